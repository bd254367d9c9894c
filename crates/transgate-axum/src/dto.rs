//! Response bodies for the gateway routes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `200` body of the translate endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationResponse {
    pub translation: String,
}

/// `GET /api/info`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub default_model: Option<String>,
    pub available_models: Vec<String>,
}

/// `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub uptime: String,
    pub start_time: DateTime<Utc>,
    pub version: &'static str,
}

/// Render an uptime like `2h3m4s`, dropping leading zero units.
pub fn format_uptime(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
