//! Environment access
//!
//! The resolver never touches `std::env` directly. It goes through an
//! [`EnvSource`] so tests (and embedders that keep their own variable table)
//! can hand it a map instead of the process environment.

use std::collections::HashMap;
use std::env;
use std::sync::{PoisonError, RwLock};

use crate::error::EnvWriteError;

/// Enables shared config/credentials file discovery in the SDK
pub const LOAD_CONFIG: &str = "AWS_SDK_LOAD_CONFIG";
pub const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const REGION: &str = "AWS_REGION";

/// Read/write access to a table of environment variables
pub trait EnvSource: Send + Sync {
    /// Look up a variable; `None` when it is not set
    fn get(&self, name: &str) -> Option<String>;

    /// Set a variable
    fn set(&self, name: &str, value: &str) -> Result<(), EnvWriteError>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        // A set-but-not-unicode variable still counts as present
        env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&self, name: &str, value: &str) -> Result<(), EnvWriteError> {
        // std::env::set_var panics on these, report them instead
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return Err(EnvWriteError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvWriteError::InvalidValue);
        }
        env::set_var(name, value);
        Ok(())
    }
}

/// An in-memory variable table
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: RwLock<HashMap<String, String>>,
    read_only: bool,
}

impl MapEnv {
    /// Create an empty, writable table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writable table from name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            read_only: false,
        }
    }

    /// Reject every subsequent write
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<(), EnvWriteError> {
        if self.read_only {
            return Err(EnvWriteError::ReadOnly);
        }
        if name.is_empty() {
            return Err(EnvWriteError::InvalidName(name.to_string()));
        }
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// The four variables the resolver looks at, read once per call
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub load_config: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
}

impl EnvSnapshot {
    /// Capture the current values from an environment source
    pub fn capture(env: &dyn EnvSource) -> Self {
        Self {
            load_config: env.get(LOAD_CONFIG),
            access_key_id: env.get(ACCESS_KEY_ID),
            secret_access_key: env.get(SECRET_ACCESS_KEY),
            region: env.get(REGION),
        }
    }

    /// True when the load-config flag is set to anything but `"false"`
    pub fn load_config_enabled(&self) -> bool {
        matches!(self.load_config.as_deref(), Some(v) if v != "false")
    }

    /// Names of the credential variables that are not set
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.access_key_id.is_none() {
            missing.push(ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            missing.push(SECRET_ACCESS_KEY);
        }
        if self.region.is_none() {
            missing.push(REGION);
        }
        missing
    }
}

impl std::fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSnapshot")
            .field("load_config", &self.load_config)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "** redacted **"),
            )
            .field("region", &self.region)
            .finish()
    }
}
