//! Translation client port.
//!
//! The gateway handler only talks to this trait; the reqwest implementation
//! lives in `transgate-upstream`. Tests swap in stubs.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::context::CallContext;
use crate::domain::ProviderConfig;

/// Errors from a single upstream translation attempt.
///
/// `Display` never includes the upstream response body; use
/// [`TranslationError::upstream_body`] to log it server-side.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The caller-supplied deadline elapsed before the upstream answered.
    #[error("Upstream call timed out after {0:?}")]
    Timeout(Duration),

    /// The caller went away and the call was abandoned.
    #[error("Upstream call was cancelled")]
    Cancelled,

    /// Connection, TLS or transport-level timeout failure.
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("Provider returned HTTP {status}")]
    Provider { status: u16, body: String },

    /// A 2xx body that is not valid chat-completion JSON.
    #[error("Failed to parse provider response: {0}")]
    ResponseParse(String),

    /// A well-formed response with an empty `choices` array.
    #[error("Provider returned no translation result")]
    EmptyResult,

    /// Serialization or other unexpected fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TranslationError {
    /// Stable short name for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Cancelled => "cancelled",
            Self::Transport(_) => "transport",
            Self::Provider { .. } => "provider",
            Self::ResponseParse(_) => "response_parse",
            Self::EmptyResult => "empty_result",
            Self::Internal(_) => "internal",
        }
    }

    /// Upstream HTTP status, when the provider answered with an error.
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw upstream error body, for server-side diagnostics only.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Provider { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Port for executing one translation against one provider.
#[async_trait]
pub trait TranslationClientPort: Send + Sync + fmt::Debug {
    /// Translate `text` with `provider`, bounded by `ctx`.
    ///
    /// Exactly one upstream attempt is made; no retries.
    async fn translate(
        &self,
        ctx: &CallContext,
        text: &str,
        provider: &ProviderConfig,
    ) -> Result<String, TranslationError>;
}
