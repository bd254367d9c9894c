//! Translate handler: validate, resolve a provider, call upstream.

use std::borrow::Cow;
use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};
use transgate_core::{CallContext, ProviderConfig, TranslationRequest, validate};

use crate::dto::TranslationResponse;
use crate::error::HttpError;
use crate::state::AppState;

/// `POST /translate` and `POST /api/v1/translate`.
pub async fn translate(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HttpError> {
    let path = uri.path();
    let started = Instant::now();

    let body = body.map_err(|rejection| {
        warn!(
            target: "transgate.http",
            path,
            latency_ms = started.elapsed().as_millis(),
            error = %rejection,
            "Failed to read request body"
        );
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpError::PayloadTooLarge("Request body too large".into())
        } else {
            HttpError::BadRequest("Failed to read request body".into())
        }
    })?;

    let request: TranslationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(
            target: "transgate.http",
            path,
            latency_ms = started.elapsed().as_millis(),
            error = %e,
            "Invalid JSON body"
        );
        HttpError::BadRequest("Invalid JSON body".into())
    })?;

    let model_type = request
        .model_type()
        .or_else(|| state.registry.default_model())
        .unwrap_or_default();

    if let Err(e) = validate(&request) {
        warn!(
            target: "transgate.http",
            path,
            model_type,
            latency_ms = started.elapsed().as_millis(),
            reason = %e,
            "Request validation failed"
        );
        return Err(e.into());
    }

    let provider: Cow<'_, ProviderConfig> = match request.inline_provider() {
        Some(inline) => Cow::Owned(inline),
        None => {
            let resolved = state.registry.resolve(request.model_type()).map_err(|e| {
                warn!(
                    target: "transgate.http",
                    path,
                    model_type,
                    latency_ms = started.elapsed().as_millis(),
                    reason = %e,
                    "Model lookup failed"
                );
                HttpError::from(e)
            })?;
            Cow::Borrowed(resolved)
        }
    };

    info!(
        target: "transgate.http",
        path,
        model_type,
        mode = %request.mode(),
        provider = %provider.kind,
        model = %provider.model_name,
        "Starting translation"
    );

    let ctx = CallContext::with_timeout(state.request_timeout);
    // Client disconnect drops this future and cancels the upstream call.
    let _cancel_on_drop = ctx.drop_guard();

    match state.client.translate(&ctx, &request.text, &provider).await {
        Ok(translation) => {
            info!(
                target: "transgate.http",
                path,
                model_type,
                latency_ms = started.elapsed().as_millis(),
                chars = translation.chars().count(),
                "Translation succeeded"
            );
            Ok(json_utf8(TranslationResponse { translation }))
        }
        Err(e) => {
            warn!(
                target: "transgate.http",
                path,
                model_type,
                kind = e.kind(),
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                upstream_status = e.upstream_status(),
                upstream_body = e.upstream_body().unwrap_or_default(),
                "Translation failed"
            );
            Err(e.into())
        }
    }
}

/// Any method other than `POST` on a translate path.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        [(header::ALLOW, "POST")],
        HttpError::MethodNotAllowed("Only POST is supported".into()),
    )
}

fn json_utf8(body: TranslationResponse) -> Response {
    let mut response = Json(body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    response
}
