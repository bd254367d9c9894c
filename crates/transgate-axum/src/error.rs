//! Axum-specific error types and mappings.
//!
//! Maps core errors to HTTP status codes and JSON bodies. Messages returned
//! to callers are generic; the detail goes to the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use transgate_core::{RegistryError, TranslationError, ValidationError};

/// Message returned for every upstream failure other than a timeout.
pub const TRANSLATION_FAILED: &str = "Translation failed";

/// Message returned when the request deadline elapses.
pub const TRANSLATION_TIMED_OUT: &str = "Translation timed out";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body over the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Wrong method on a known path.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Upstream did not answer before the request deadline.
    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::PayloadTooLarge(msg)
            | Self::MethodNotAllowed(msg)
            | Self::GatewayTimeout(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message().to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for HttpError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<RegistryError> for HttpError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NoDefaultModel | RegistryError::UnknownModel(_) => {
                Self::BadRequest(err.to_string())
            }
            // Startup rejects this, so seeing it per request is a server fault.
            RegistryError::DefaultNotRegistered(_) => Self::Internal(TRANSLATION_FAILED.into()),
        }
    }
}

impl From<TranslationError> for HttpError {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::Timeout(_) => Self::GatewayTimeout(TRANSLATION_TIMED_OUT.into()),
            TranslationError::Cancelled
            | TranslationError::Transport(_)
            | TranslationError::Provider { .. }
            | TranslationError::ResponseParse(_)
            | TranslationError::EmptyResult
            | TranslationError::Internal(_) => Self::Internal(TRANSLATION_FAILED.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = HttpError::from(ValidationError::MissingText);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No text provided for translation");
    }

    #[test]
    fn test_registry_lookup_maps_to_bad_request() {
        let err = HttpError::from(RegistryError::UnknownModel("claude".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("claude"));

        let err = HttpError::from(RegistryError::NoDefaultModel);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_timeout_is_distinct_from_other_failures() {
        let timeout = HttpError::from(TranslationError::Timeout(Duration::from_secs(30)));
        let transport = HttpError::from(TranslationError::Transport("reset".into()));
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(transport.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(timeout.message(), transport.message());
    }

    #[test]
    fn test_provider_body_is_not_exposed() {
        let err = HttpError::from(TranslationError::Provider {
            status: 401,
            body: "invalid key sk-secret".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), TRANSLATION_FAILED);
    }
}
