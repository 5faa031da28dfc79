//! Configuration management module
//!
//! Environment access used by the credential resolver, and application
//! settings loaded from environment variables and .env files.

pub mod env;
pub mod settings;

pub use env::{EnvSnapshot, EnvSource, MapEnv, ProcessEnv};
pub use settings::Settings;
