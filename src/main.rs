//! aws-session
//!
//! Resolves an AWS credential strategy the same way the library does and
//! prints what was picked. Never prints secret material.

use anyhow::{Context, Result};
use aws_session::{
    config::Settings,
    session::{CredentialResolver, SdkFactory, Session},
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Resolve an AWS session and print a summary
#[derive(Parser, Debug)]
#[command(name = "aws-session")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long)]
    log_level: Option<String>,

    /// Profile to read for the profile strategy (defaults to AWS_PROFILE or "default")
    #[arg(long)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick the strategy from AWS_SDK_LOAD_CONFIG / AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY / AWS_REGION
    Auto,
    /// Use the shared config and credentials files
    Profile,
    /// Use credentials from the environment in the given region
    Env {
        #[arg(long)]
        region: String,
    },
    /// Use the given access key pair
    Static {
        #[arg(long)]
        access_key_id: String,
        #[arg(long)]
        secret_access_key: String,
        #[arg(long)]
        region: String,
    },
}

#[derive(Serialize)]
struct Summary<'a> {
    strategy: &'a str,
    region: Option<&'a str>,
    has_credentials_provider: bool,
}

impl<'a> From<&'a Session> for Summary<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            strategy: session.strategy().name(),
            region: session.region(),
            has_credentials_provider: session.sdk_config().credentials_provider().is_some(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load()?;
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    init_tracing(&settings.log_level);

    tracing::debug!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        "Starting"
    );

    let factory = match args.profile {
        Some(profile) => SdkFactory::new().with_profile_name(profile),
        None => SdkFactory::new(),
    };
    let resolver = CredentialResolver::new(factory);

    let session = match args.command.unwrap_or(Command::Auto) {
        Command::Auto => resolver.resolve_default().await,
        Command::Profile => resolver.resolve_using_profile().await,
        Command::Env { region } => resolver.resolve_using_environment_region(&region).await,
        Command::Static {
            access_key_id,
            secret_access_key,
            region,
        } => {
            resolver
                .resolve_using_explicit_credentials(&access_key_id, &secret_access_key, &region)
                .await
        }
    }
    .context("Failed to create AWS session")?;

    let summary = serde_json::to_string_pretty(&Summary::from(&session))?;
    println!("{}", summary);

    Ok(())
}

/// Initialize tracing subscriber with the specified log level, JSON to stderr
fn init_tracing(log_level: &str) {
    // Build filter from RUST_LOG env var or use provided log level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let console_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
