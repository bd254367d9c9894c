//! Request logging and CORS layers.
//!
//! Layer order in the router: the CORS header defaults outermost, then CORS
//! itself (preflights never reach the logger or handlers), request logging
//! inside it, handlers innermost.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::Router;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::bootstrap::CorsConfig;

/// Preflight cache lifetime advertised to browsers.
pub const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::OPTIONS,
    Method::PUT,
    Method::DELETE,
];

fn allowed_headers() -> [HeaderName; 4] {
    [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        HeaderName::from_static("x-requested-with"),
    ]
}

/// Log method and path on entry, and status plus latency on completion.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    info!(target: "transgate.http", %method, %path, "Request started");

    let response = next.run(req).await;

    info!(
        target: "transgate.http",
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Build CORS layer from configuration.
///
/// Every `OPTIONS` request is answered here with `200` and an empty body.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = match config {
        CorsConfig::AllowAll => AllowOrigin::any(),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            AllowOrigin::list(allowed)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers())
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}

/// Apply CORS to `router`.
///
/// `CorsLayer` only sends allowed methods, allowed headers and max-age on
/// preflights. The outer layers add them to every other response as well and
/// leave preflight values untouched.
pub fn with_cors<S>(router: Router<S>, config: &CorsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(build_cors_layer(config))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            join_header_value(ALLOWED_METHODS.iter().map(Method::as_str)),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            join_header_value(allowed_headers().iter().map(HeaderName::as_str)),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from(CORS_MAX_AGE.as_secs()),
        ))
}

fn join_header_value<'a>(parts: impl Iterator<Item = &'a str>) -> HeaderValue {
    let joined = parts.collect::<Vec<_>>().join(",");
    // Method and header names are visible ASCII.
    HeaderValue::from_str(&joined).unwrap_or_else(|_| HeaderValue::from_static(""))
}
