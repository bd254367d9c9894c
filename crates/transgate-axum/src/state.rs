//! Shared application state type.

use crate::bootstrap::GatewayContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// The registry inside is immutable, so handlers read it without locking.
pub type AppState = Arc<GatewayContext>;
