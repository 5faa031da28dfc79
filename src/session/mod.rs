//! Session creation
//!
//! Strategy selection, the factory seam, and the service clients built on
//! top of a resolved session.

pub mod clients;
pub mod config;
pub mod factory;
pub mod resolver;

pub use clients::ClientBuilder;
pub use config::{SessionConfig, StaticCredentials, Strategy};
pub use factory::{ConfigFactory, SdkFactory, Session};
pub use resolver::{
    create, create_using_environment, create_using_profile, create_using_strings,
    select_strategy, CredentialResolver,
};
