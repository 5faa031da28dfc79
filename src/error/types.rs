//! Session resolution error types

use thiserror::Error;

/// Failure to write a variable through an [`EnvSource`](crate::config::EnvSource)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvWriteError {
    #[error("environment is read-only")]
    ReadOnly,

    #[error("invalid variable name {0:?}")]
    InvalidName(String),

    #[error("value contains a NUL byte")]
    InvalidValue,
}

#[derive(Error, Debug)]
pub enum SessionError {
    /// None of the recognized strategies apply to the current environment
    #[error(
        "Either AWS_SDK_LOAD_CONFIG must be set to true, or all of AWS_ACCESS_KEY_ID, \
         AWS_SECRET_ACCESS_KEY, and AWS_REGION must be set (missing: {missing})"
    )]
    Configuration { missing: String },

    #[error("Error while setting the environment variable {name}: {source}")]
    EnvironmentWrite {
        name: &'static str,
        #[source]
        source: EnvWriteError,
    },

    /// Error returned by the session factory, forwarded untouched
    #[error(transparent)]
    Factory(#[from] anyhow::Error),
}

impl SessionError {
    /// Build a configuration error listing the variables that were absent
    pub fn configuration(missing: &[&str]) -> Self {
        let missing = if missing.is_empty() {
            "none".to_string()
        } else {
            missing.join(", ")
        };
        SessionError::Configuration { missing }
    }

    /// Whether this error came from the environment rather than the factory
    pub fn is_configuration(&self) -> bool {
        matches!(self, SessionError::Configuration { .. })
    }
}
