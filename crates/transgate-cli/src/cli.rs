//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use transgate_axum::ServerConfig;
use transgate_axum::bootstrap::DEFAULT_MAX_BODY_BYTES;

/// HTTP gateway that translates text through LLM chat-completion providers.
#[derive(Debug, Parser)]
#[command(name = "transgate")]
#[command(version)]
pub struct Cli {
    /// Provider config file [default: $TRANSGATE_DATA_DIR/config.json, else ./config.json]
    #[arg(long, env = "TRANSGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port; overrides the port in the config file
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Deadline for one upstream translation, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// How long shutdown waits for in-flight requests, in seconds
    #[arg(long, default_value_t = 5)]
    pub shutdown_grace_secs: u64,

    /// Allowed CORS origin (repeatable). Any origin is allowed when omitted
    #[arg(long = "allow-origin")]
    pub allow_origins: Vec<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Turn parsed arguments into the server configuration.
    pub fn into_server_config(self) -> Result<ServerConfig> {
        let mut config = ServerConfig::with_defaults()?;

        if let Some(path) = self.config {
            config = config.with_config_path(path);
        }
        if !self.allow_origins.is_empty() {
            config = config.with_allowed_origins(self.allow_origins);
        }

        config.host = self.host;
        config.port = self.port;
        config.request_timeout = Duration::from_secs(self.request_timeout_secs);
        config.max_body_bytes = self.max_body_bytes;
        config.shutdown_grace = Duration::from_secs(self.shutdown_grace_secs);

        Ok(config)
    }
}
