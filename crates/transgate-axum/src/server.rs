//! Gateway lifecycle: bind, serve, drain, stop.
//!
//! - **Bind-then-report**: the listener is bound before the server task is
//!   spawned, so [`GatewayServer::local_addr`] is the real address.
//! - **Bounded drain**: shutdown stops accepting, waits for in-flight requests
//!   up to the grace deadline, then aborts the server task.
//! - **Observable phase**: every transition is published on a watch channel.

use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Where the server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Registry and routes built, listener being bound.
    Starting,
    /// Accepting connections.
    Serving,
    /// Shutdown requested; waiting for in-flight requests.
    Draining,
    /// Listener closed.
    Stopped,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starting => write!(f, "Starting"),
            Self::Serving => write!(f, "Serving"),
            Self::Draining => write!(f, "Draining"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Error from server lifecycle operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {reason}")]
    BindFailed { address: String, reason: String },

    /// The server task failed or panicked.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A running gateway listener.
pub struct GatewayServer {
    bound_addr: SocketAddr,
    cancel_token: CancellationToken,
    join_handle: JoinHandle<std::io::Result<()>>,
    phase: watch::Sender<LifecyclePhase>,
    shutdown_grace: Duration,
}

impl GatewayServer {
    /// Bind `host:port` and start serving `router`.
    ///
    /// Port `0` picks an ephemeral port; read it back with [`Self::local_addr`].
    pub async fn bind(
        router: Router,
        host: &str,
        port: u16,
        shutdown_grace: Duration,
    ) -> Result<Self, ServerError> {
        let (phase, _) = watch::channel(LifecyclePhase::Starting);

        // Bind FIRST - get real address before spawning
        let bind_addr = format!("{host}:{port}");
        let listener =
            TcpListener::bind(&bind_addr)
                .await
                .map_err(|e| ServerError::BindFailed {
                    address: bind_addr.clone(),
                    reason: e.to_string(),
                })?;

        let bound_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Internal(format!("Failed to get local address: {e}")))?;

        let cancel_token = CancellationToken::new();
        let shutdown = cancel_token.clone().cancelled_owned();

        let join_handle = tokio::spawn(async move {
            debug!(addr = %bound_addr, "Server task starting");
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
        });

        phase.send_replace(LifecyclePhase::Serving);
        info!(addr = %bound_addr, "Gateway bound");

        Ok(Self {
            bound_addr,
            cancel_token,
            join_handle,
            phase,
            shutdown_grace,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.bound_addr
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        *self.phase.borrow()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<LifecyclePhase> {
        self.phase.subscribe()
    }

    /// Serve until `signal` resolves, then drain.
    pub async fn run_until<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        signal.await;
        info!("Shutdown signal received");
        self.shutdown().await
    }

    /// Stop accepting and wait for in-flight requests up to the grace deadline.
    ///
    /// An elapsed deadline aborts the server task and is logged, not returned
    /// as an error.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.phase.send_replace(LifecyclePhase::Draining);
        info!(
            addr = %self.bound_addr,
            grace_ms = self.shutdown_grace.as_millis(),
            "Draining in-flight requests"
        );

        self.cancel_token.cancel();

        // Keep ownership of join_handle so we can abort on timeout
        let mut join = self.join_handle;

        let result = match tokio::time::timeout(self.shutdown_grace, &mut join).await {
            Ok(Ok(Ok(()))) => {
                info!("Gateway stopped cleanly");
                Ok(())
            }
            Ok(Ok(Err(e))) => {
                error!("Server task ended with error: {e}");
                Err(ServerError::Internal(format!("Server error: {e}")))
            }
            Ok(Err(join_err)) => {
                error!("Server task panicked: {join_err}");
                Err(ServerError::Internal(format!("Task panicked: {join_err}")))
            }
            Err(_) => {
                warn!("Drain deadline elapsed; aborting remaining connections");
                join.abort();
                Ok(())
            }
        };

        self.phase.send_replace(LifecyclePhase::Stopped);
        result
    }
}

impl fmt::Debug for GatewayServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayServer")
            .field("bound_addr", &self.bound_addr)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
