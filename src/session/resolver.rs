//! Credential strategy resolution
//!
//! Precedence, evaluated once per call:
//! 1. `AWS_SDK_LOAD_CONFIG` set to anything but `"false"`: shared profile files
//! 2. `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_REGION` all set:
//!    environment credentials in that region
//! 3. otherwise a [`SessionError::Configuration`] naming all four variables
//!
//! There is no fallback to the profile files after step 3.

use crate::config::env::{EnvSnapshot, EnvSource, ProcessEnv, LOAD_CONFIG};
use crate::error::SessionError;

use super::config::{SessionConfig, Strategy};
use super::factory::{ConfigFactory, SdkFactory, Session};

/// Pick a strategy from an environment snapshot
///
/// Only ever yields [`Strategy::Profile`] or [`Strategy::Environment`].
pub fn select_strategy(snapshot: &EnvSnapshot) -> Result<Strategy, SessionError> {
    if snapshot.load_config_enabled() {
        return Ok(Strategy::Profile);
    }

    match (
        &snapshot.access_key_id,
        &snapshot.secret_access_key,
        &snapshot.region,
    ) {
        (Some(_), Some(_), Some(region)) => Ok(Strategy::Environment {
            region: region.clone(),
        }),
        _ => {
            // A flag set to "false" is present, just not enabled
            let mut missing = Vec::new();
            if snapshot.load_config.is_none() {
                missing.push(LOAD_CONFIG);
            }
            missing.extend(snapshot.missing_credentials());
            Err(SessionError::configuration(&missing))
        }
    }
}

/// Resolves a credential strategy and asks a factory for a session
pub struct CredentialResolver<F, E = ProcessEnv> {
    factory: F,
    env: E,
}

impl<F: ConfigFactory> CredentialResolver<F, ProcessEnv> {
    /// Resolver over the process environment
    pub fn new(factory: F) -> Self {
        Self::with_env(factory, ProcessEnv)
    }
}

impl<F: ConfigFactory, E: EnvSource> CredentialResolver<F, E> {
    /// Resolver over a custom environment source
    pub fn with_env(factory: F, env: E) -> Self {
        Self { factory, env }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// The strategy [`resolve_default`](Self::resolve_default) would take right now
    pub fn select_strategy(&self) -> Result<Strategy, SessionError> {
        select_strategy(&EnvSnapshot::capture(&self.env))
    }

    /// Create a session using whichever strategy the environment selects
    pub async fn resolve_default(&self) -> Result<F::Handle, SessionError> {
        let strategy = match self.select_strategy() {
            Ok(strategy) => strategy,
            Err(err) => {
                tracing::warn!(error = %err, "No AWS credential strategy applies");
                return Err(err);
            }
        };

        tracing::info!(
            strategy = %strategy,
            region = strategy.region().unwrap_or("<profile>"),
            "Resolved AWS credential strategy"
        );

        match strategy {
            Strategy::Profile => self.resolve_using_profile().await,
            Strategy::Environment { region } | Strategy::Explicit { region } => {
                self.resolve_using_environment_region(&region).await
            }
        }
    }

    /// Enable shared config loading and create a session from the profile files
    ///
    /// Writes `AWS_SDK_LOAD_CONFIG=true` before calling the factory. A failed
    /// write is reported as [`SessionError::EnvironmentWrite`] and the factory
    /// is not called.
    pub async fn resolve_using_profile(&self) -> Result<F::Handle, SessionError> {
        self.env
            .set(LOAD_CONFIG, "true")
            .map_err(|source| SessionError::EnvironmentWrite {
                name: LOAD_CONFIG,
                source,
            })?;

        tracing::debug!("Creating session from shared profile files");

        Ok(self.factory.create(SessionConfig::profile()).await?)
    }

    /// Create a session in `region`, leaving credentials to the factory's
    /// environment-variable convention
    pub async fn resolve_using_environment_region(
        &self,
        region: &str,
    ) -> Result<F::Handle, SessionError> {
        tracing::debug!(region = %region, "Creating session from environment credentials");

        Ok(self.factory.create(SessionConfig::with_region(region)).await?)
    }

    /// Create a session from caller-supplied key, secret and region
    pub async fn resolve_using_explicit_credentials(
        &self,
        access_key_id: &str,
        secret_access_key: &str,
        region: &str,
    ) -> Result<F::Handle, SessionError> {
        tracing::debug!(region = %region, "Creating session from explicit credentials");

        let config =
            SessionConfig::with_static_credentials(access_key_id, secret_access_key, region);
        Ok(self.factory.create(config).await?)
    }
}

/// Create a session from the process environment (convenience function)
pub async fn create() -> Result<Session, SessionError> {
    CredentialResolver::new(SdkFactory::new())
        .resolve_default()
        .await
}

/// Create a session from the shared profile files (convenience function)
pub async fn create_using_profile() -> Result<Session, SessionError> {
    CredentialResolver::new(SdkFactory::new())
        .resolve_using_profile()
        .await
}

/// Create a session from environment credentials in `region` (convenience function)
pub async fn create_using_environment(region: &str) -> Result<Session, SessionError> {
    CredentialResolver::new(SdkFactory::new())
        .resolve_using_environment_region(region)
        .await
}

/// Create a session from explicit strings (convenience function)
pub async fn create_using_strings(
    access_key_id: &str,
    secret_access_key: &str,
    region: &str,
) -> Result<Session, SessionError> {
    CredentialResolver::new(SdkFactory::new())
        .resolve_using_explicit_credentials(access_key_id, secret_access_key, region)
        .await
}
