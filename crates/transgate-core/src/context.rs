//! Deadline-bearing, cancellable call context.
//!
//! Each translation gets a `CallContext` derived from the inbound request:
//! a fixed deadline plus a cancellation token. The upstream client races its
//! network call against both.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Deadline and cancellation for one upstream call.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Instant,
    cancel: CancellationToken,
}

impl CallContext {
    /// Context expiring `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Context expiring at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline,
            cancel: CancellationToken::new(),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// Guard that cancels this context when dropped.
    ///
    /// Hold it in the request handler: if the client disconnects, the handler
    /// future is dropped and the in-flight upstream call is cancelled.
    #[must_use]
    pub fn drop_guard(&self) -> DropGuard {
        self.cancel.clone().drop_guard()
    }
}
