//! Service clients built from a resolved session
//!
//! Clients inherit the session's region and credentials whichever strategy
//! produced it. `Settings` can point a client at a local endpoint instead.

use aws_sdk_bedrockruntime::Client as BedrockRuntimeClient;
use aws_sdk_dynamodb::Client as DynamoDbClient;

use crate::config::Settings;

use super::factory::Session;

/// Builds AWS service clients on top of a [`Session`]
///
/// Building a client never loads or checks credentials.
pub struct ClientBuilder<'a> {
    session: &'a Session,
    settings: &'a Settings,
}

impl<'a> ClientBuilder<'a> {
    pub fn new(session: &'a Session, settings: &'a Settings) -> Self {
        Self { session, settings }
    }

    /// DynamoDB client signed with the session's credentials
    ///
    /// `dynamodb_endpoint_url` overrides the regional endpoint; the region
    /// still comes from the session.
    pub fn dynamodb(&self) -> DynamoDbClient {
        let sdk_config = self.session.sdk_config();

        match &self.settings.dynamodb_endpoint_url {
            Some(endpoint_url) => {
                tracing::info!(endpoint = %endpoint_url, "Using custom DynamoDB endpoint");

                let config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
                    .endpoint_url(endpoint_url)
                    .build();
                DynamoDbClient::from_conf(config)
            }
            None => DynamoDbClient::new(sdk_config),
        }
    }

    /// Bedrock Runtime client signed with the session's credentials
    ///
    /// `bedrock_endpoint_url` overrides the regional endpoint.
    pub fn bedrock_runtime(&self) -> BedrockRuntimeClient {
        let sdk_config = self.session.sdk_config();

        match &self.settings.bedrock_endpoint_url {
            Some(endpoint_url) => {
                tracing::info!(endpoint = %endpoint_url, "Using custom Bedrock endpoint");

                let config = aws_sdk_bedrockruntime::config::Builder::from(sdk_config)
                    .endpoint_url(endpoint_url)
                    .build();
                BedrockRuntimeClient::from_conf(config)
            }
            None => BedrockRuntimeClient::new(sdk_config),
        }
    }
}
