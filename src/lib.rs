//! Pick an AWS credential strategy and build an SDK session from it

pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use config::Settings;
pub use error::SessionError;
pub use session::{
    create, create_using_environment, create_using_profile, create_using_strings,
    CredentialResolver, SdkFactory, Session,
};
