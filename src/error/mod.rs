//! Error types
//!
//! Errors raised while resolving a credential strategy or writing to the
//! environment.

pub mod types;

pub use types::{EnvWriteError, SessionError};
