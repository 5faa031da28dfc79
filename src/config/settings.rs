//! Application settings
//!
//! Settings that sit around credential resolution: log level and custom
//! service endpoints. Loaded from environment variables with defaults.

use anyhow::Result;
use std::env;

/// Main application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub log_level: String,

    /// Custom DynamoDB endpoint (DynamoDB Local, LocalStack)
    pub dynamodb_endpoint_url: Option<String>,
    /// Custom Bedrock Runtime endpoint (mocks)
    pub bedrock_endpoint_url: Option<String>,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "aws-session"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env_or_default("LOG_LEVEL", "info"),
            dynamodb_endpoint_url: env::var("DYNAMODB_ENDPOINT_URL").ok(),
            bedrock_endpoint_url: env::var("BEDROCK_ENDPOINT_URL").ok(),
        };

        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("DYNAMODB_ENDPOINT_URL", &self.dynamodb_endpoint_url),
            ("BEDROCK_ENDPOINT_URL", &self.bedrock_endpoint_url),
        ] {
            if let Some(url) = url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    anyhow::bail!("{} must be an http(s) URL, got {:?}", name, url);
                }
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "aws-session".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            dynamodb_endpoint_url: None,
            bedrock_endpoint_url: None,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
