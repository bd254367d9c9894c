//! transgate entry point.
//!
//! Parses arguments, installs the tracing subscriber, and runs the gateway
//! until SIGINT or SIGTERM.

mod cli;

use clap::Parser;
use tokio::signal;
use tracing::error;
use tracing_subscriber::EnvFilter;
use transgate_axum::start_server;

use crate::cli::Cli;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "transgate=debug,tower_http=debug"
    } else {
        "transgate=info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_server_config()?;
    tracing::debug!(?config, "Resolved server config");

    start_server(config, shutdown_signal()).await
}
