//! Resolved session configuration
//!
//! What the resolver hands to a [`ConfigFactory`](super::ConfigFactory):
//! either "use profile files" or a region with optional static credentials.

use serde::Serialize;
use std::fmt;

/// Static access key credentials
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Empty when the credentials are long-lived
    pub session_token: String,
}

impl StaticCredentials {
    /// Long-lived credentials; the session token is left empty
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: String::new(),
        }
    }

    /// Set session token for temporary credentials
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = token.into();
        self
    }

    /// The session token, `None` when empty
    pub fn session_token(&self) -> Option<&str> {
        if self.session_token.is_empty() {
            None
        } else {
            Some(&self.session_token)
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Which credential strategy produced a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// Shared config and credentials files
    Profile,
    /// Region given, credentials from the SDK's environment variables
    Environment { region: String },
    /// Region and credentials passed in by the caller
    Explicit { region: String },
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Profile => "profile",
            Strategy::Environment { .. } => "environment",
            Strategy::Explicit { .. } => "explicit",
        }
    }

    pub fn region(&self) -> Option<&str> {
        match self {
            Strategy::Profile => None,
            Strategy::Environment { region } | Strategy::Explicit { region } => Some(region),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration handed to the session factory
///
/// No region means the SDK discovers region and credentials itself.
/// Credentials are only ever carried together with a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    region: Option<String>,
    credentials: Option<StaticCredentials>,
}

impl SessionConfig {
    /// Profile-file configuration; nothing else is set
    pub fn profile() -> Self {
        Self {
            region: None,
            credentials: None,
        }
    }

    /// Region only; credentials are left to the factory
    pub fn with_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            credentials: None,
        }
    }

    /// Region plus static credentials
    pub fn with_static_credentials(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            region: Some(region.into()),
            credentials: Some(StaticCredentials::new(access_key_id, secret_access_key)),
        }
    }

    /// Load region and credentials from the shared profile files
    pub fn use_profile(&self) -> bool {
        self.region.is_none()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn credentials(&self) -> Option<&StaticCredentials> {
        self.credentials.as_ref()
    }

    /// The strategy this configuration represents
    pub fn strategy(&self) -> Strategy {
        match (&self.region, &self.credentials) {
            (None, _) => Strategy::Profile,
            (Some(region), Some(_)) => Strategy::Explicit {
                region: region.clone(),
            },
            (Some(region), None) => Strategy::Environment {
                region: region.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_credentials_have_empty_token() {
        let config = SessionConfig::with_static_credentials("AKIA...", "secret", "us-east-1");

        assert_eq!(config.region(), Some("us-east-1"));
        let creds = config.credentials().unwrap();
        assert_eq!(creds.access_key_id, "AKIA...");
        assert_eq!(creds.secret_access_key, "secret");
        assert_eq!(creds.session_token, "");
        assert_eq!(creds.session_token(), None);
        assert!(!config.use_profile());
    }

    #[test]
    fn test_static_credentials_always_come_with_region() {
        let profile = SessionConfig::profile();
        assert!(profile.use_profile());
        assert_eq!(profile.region(), None);
        assert!(profile.credentials().is_none());

        let explicit = SessionConfig::with_static_credentials("k", "s", "us-west-2");
        assert!(!explicit.use_profile());
        assert!(explicit.credentials().is_some());
        assert_eq!(explicit.strategy().name(), "explicit");
    }

    #[test]
    fn test_strategy_from_config() {
        assert_eq!(SessionConfig::profile().strategy(), Strategy::Profile);
        assert_eq!(
            SessionConfig::with_region("eu-west-1").strategy(),
            Strategy::Environment {
                region: "eu-west-1".to_string()
            }
        );
        assert_eq!(
            SessionConfig::with_static_credentials("k", "s", "us-west-2").strategy(),
            Strategy::Explicit {
                region: "us-west-2".to_string()
            }
        );
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = StaticCredentials::new("AKIAEXAMPLE", "very-secret").with_session_token("tok-xyz");
        let rendered = format!("{:?}", creds);

        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("tok-xyz"));
    }

    #[test]
    fn test_strategy_serializes_with_tag() {
        let value = serde_json::to_value(Strategy::Environment {
            region: "eu-west-1".to_string(),
        })
        .unwrap();
        assert_eq!(value["strategy"], "environment");
        assert_eq!(value["region"], "eu-west-1");
        assert_eq!(Strategy::Profile.to_string(), "profile");
    }
}
