//! Session factories
//!
//! [`ConfigFactory`] is the seam between strategy selection and the SDK.
//! [`SdkFactory`] is the production implementation backed by `aws-config`.

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{
    environment::EnvironmentVariableCredentialsProvider, BehaviorVersion, ConfigLoader, Region,
    SdkConfig,
};
use aws_sdk_dynamodb::config::Credentials;

use super::config::{SessionConfig, Strategy};

/// Provider name reported by credentials built from caller-supplied strings
const STATIC_PROVIDER_NAME: &str = "aws-session-static";

/// Builds a session handle from a resolved configuration
#[async_trait]
pub trait ConfigFactory: Send + Sync {
    type Handle: Send;

    async fn create(&self, config: SessionConfig) -> Result<Self::Handle>;
}

/// An SDK session: the loaded configuration plus the strategy behind it
#[derive(Debug, Clone)]
pub struct Session {
    sdk_config: SdkConfig,
    strategy: Strategy,
}

impl Session {
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Region the SDK ended up with, if any
    pub fn region(&self) -> Option<&str> {
        self.sdk_config.region().map(|r| r.as_ref())
    }

    pub fn into_sdk_config(self) -> SdkConfig {
        self.sdk_config
    }
}

/// Factory that loads an [`SdkConfig`] through `aws-config`
#[derive(Debug, Clone, Default)]
pub struct SdkFactory {
    profile_name: Option<String>,
}

impl SdkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a named profile instead of `AWS_PROFILE`/`default` for the profile strategy
    pub fn with_profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    /// Leave region and credentials to the SDK's default chains
    ///
    /// Those chains cover environment variables, the shared config and
    /// credentials files, SSO, ECS and IMDS. A configured profile name only
    /// selects which profile the chains read.
    fn profile_loader(&self, loader: ConfigLoader) -> ConfigLoader {
        match &self.profile_name {
            Some(name) => loader.profile_name(name),
            None => loader,
        }
    }
}

#[async_trait]
impl ConfigFactory for SdkFactory {
    type Handle = Session;

    async fn create(&self, config: SessionConfig) -> Result<Session> {
        let strategy = config.strategy();
        let loader = aws_config::defaults(BehaviorVersion::latest());

        let loader = match (&strategy, config.credentials()) {
            (Strategy::Profile, _) => self.profile_loader(loader),
            (Strategy::Explicit { region }, Some(creds)) => {
                let session_token = creds.session_token().map(str::to_string);
                loader
                    .region(Region::new(region.clone()))
                    .credentials_provider(Credentials::new(
                        creds.access_key_id.clone(),
                        creds.secret_access_key.clone(),
                        session_token,
                        None,
                        STATIC_PROVIDER_NAME,
                    ))
            }
            (Strategy::Environment { region } | Strategy::Explicit { region }, _) => loader
                .region(Region::new(region.clone()))
                .credentials_provider(EnvironmentVariableCredentialsProvider::new()),
        };

        let sdk_config = loader.load().await;

        tracing::debug!(
            strategy = %strategy,
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            "Loaded SDK configuration"
        );

        Ok(Session {
            sdk_config,
            strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::ProvideCredentials;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::tempdir;

    const AWS_VARS: [&str; 10] = [
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_SESSION_TOKEN",
        "AWS_REGION",
        "AWS_DEFAULT_REGION",
        "AWS_PROFILE",
        "AWS_CONFIG_FILE",
        "AWS_SHARED_CREDENTIALS_FILE",
        "AWS_SDK_LOAD_CONFIG",
        "AWS_EC2_METADATA_DISABLED",
    ];

    fn clear_aws_env() {
        for name in AWS_VARS {
            env::remove_var(name);
        }
    }

    async fn access_key_of(session: &Session) -> String {
        session
            .sdk_config()
            .credentials_provider()
            .unwrap()
            .provide_credentials()
            .await
            .unwrap()
            .access_key_id()
            .to_string()
    }

    #[tokio::test]
    async fn test_static_credentials_session() {
        let config = SessionConfig::with_static_credentials("AKIAEXAMPLE", "secret", "us-east-1");
        let session = SdkFactory::new().create(config).await.unwrap();

        assert_eq!(session.region(), Some("us-east-1"));
        assert_eq!(
            session.strategy(),
            &Strategy::Explicit {
                region: "us-east-1".to_string()
            }
        );
        assert!(session.sdk_config().credentials_provider().is_some());
    }

    #[tokio::test]
    async fn test_environment_region_session() {
        let session = SdkFactory::new()
            .create(SessionConfig::with_region("eu-west-1"))
            .await
            .unwrap();

        assert_eq!(session.region(), Some("eu-west-1"));
        assert_eq!(session.strategy().name(), "environment");
        assert!(session.sdk_config().credentials_provider().is_some());
    }

    #[tokio::test]
    async fn test_into_sdk_config_keeps_region() {
        let session = SdkFactory::new()
            .create(SessionConfig::with_region("ap-southeast-2"))
            .await
            .unwrap();

        let sdk_config = session.into_sdk_config();
        assert_eq!(sdk_config.region().unwrap().as_ref(), "ap-southeast-2");
    }

    #[tokio::test]
    #[serial]
    async fn test_profile_session_uses_default_credential_chain() {
        clear_aws_env();
        let dir = tempdir().unwrap();
        env::set_var("AWS_CONFIG_FILE", dir.path().join("config"));
        env::set_var("AWS_SHARED_CREDENTIALS_FILE", dir.path().join("credentials"));
        env::set_var("AWS_EC2_METADATA_DISABLED", "true");
        env::set_var("AWS_ACCESS_KEY_ID", "K");
        env::set_var("AWS_SECRET_ACCESS_KEY", "S");
        env::set_var("AWS_REGION", "eu-central-1");
        env::set_var("AWS_SDK_LOAD_CONFIG", "true");

        let session = SdkFactory::new()
            .create(SessionConfig::profile())
            .await
            .unwrap();

        assert_eq!(session.strategy(), &Strategy::Profile);
        assert_eq!(session.region(), Some("eu-central-1"));
        assert_eq!(access_key_of(&session).await, "K");

        clear_aws_env();
    }

    #[tokio::test]
    #[serial]
    async fn test_profile_session_with_profile_name() {
        clear_aws_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config");
        let credentials_path = dir.path().join("credentials");
        fs::write(
            &config_path,
            "[default]\nregion = us-east-1\n\n[profile dev]\nregion = ca-central-1\n",
        )
        .unwrap();
        fs::write(
            &credentials_path,
            "[default]\naws_access_key_id = DEFAULTKEY\naws_secret_access_key = DEFAULTSECRET\n\n\
             [dev]\naws_access_key_id = DEVKEY\naws_secret_access_key = DEVSECRET\n",
        )
        .unwrap();
        env::set_var("AWS_CONFIG_FILE", &config_path);
        env::set_var("AWS_SHARED_CREDENTIALS_FILE", &credentials_path);
        env::set_var("AWS_EC2_METADATA_DISABLED", "true");

        let session = SdkFactory::new()
            .with_profile_name("dev")
            .create(SessionConfig::profile())
            .await
            .unwrap();
        assert_eq!(session.region(), Some("ca-central-1"));
        assert_eq!(access_key_of(&session).await, "DEVKEY");

        let session = SdkFactory::new()
            .create(SessionConfig::profile())
            .await
            .unwrap();
        assert_eq!(session.region(), Some("us-east-1"));
        assert_eq!(access_key_of(&session).await, "DEFAULTKEY");

        clear_aws_env();
    }

    #[tokio::test]
    async fn test_static_credentials_are_provided() {
        let config = SessionConfig::with_static_credentials("AKIAEXAMPLE", "secret", "us-east-1");
        let session = SdkFactory::new().create(config).await.unwrap();

        assert_eq!(access_key_of(&session).await, "AKIAEXAMPLE");
    }
}
