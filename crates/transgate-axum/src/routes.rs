//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{MethodRouter, get, post};

use crate::bootstrap::{CorsConfig, GatewayContext};
use crate::handlers;
use crate::middleware::{log_requests, with_cors};
use crate::state::AppState;

fn translate_route() -> MethodRouter<AppState> {
    post(handlers::translate::translate).fallback(handlers::translate::method_not_allowed)
}

/// Create the gateway router.
///
/// Both translate paths share one handler and the body limit. Wrong methods
/// get a JSON `405` without the body being read.
pub fn create_router(ctx: GatewayContext, cors_config: &CorsConfig) -> Router {
    let body_limit = ctx.max_body_bytes;
    let state: AppState = Arc::new(ctx);

    let router = Router::new()
        .route("/", get(handlers::system::home))
        .route("/health", get(handlers::system::health_check))
        .route("/api/info", get(handlers::system::info))
        .route("/api/status", get(handlers::system::status))
        .route("/translate", translate_route())
        .route("/api/v1/translate", translate_route())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_requests));

    with_cors(router, cors_config).with_state(state)
}
