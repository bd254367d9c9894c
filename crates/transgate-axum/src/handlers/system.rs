//! Service info, status, health and landing page.

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use chrono::Utc;

use crate::dto::{InfoResponse, StatusResponse, format_uptime};
use crate::state::AppState;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>transgate</title>
    <style>
        body { font-family: sans-serif; text-align: center; padding-top: 80px; color: #333; }
        code { background: #f4f4f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>transgate translation service is running</h1>
    <p>POST <code>{"text": "..."}</code> to <code>/translate</code></p>
</body>
</html>
"#;

/// `GET /`.
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Health check endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// `GET /api/info`: configured model types and the default.
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        default_model: state.registry.default_model().map(str::to_string),
        available_models: state
            .registry
            .model_types()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// `GET /api/status`: uptime and start time.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        uptime: format_uptime(Utc::now() - state.started_at),
        start_time: state.started_at,
        version: env!("CARGO_PKG_VERSION"),
    })
}
