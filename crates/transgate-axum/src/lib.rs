#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Used by integration tests only
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use reqwest as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

// Re-export primary types
pub use bootstrap::{CorsConfig, GatewayContext, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use server::{GatewayServer, LifecyclePhase, ServerError};
pub use state::AppState;
