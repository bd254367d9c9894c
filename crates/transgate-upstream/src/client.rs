//! Reqwest-backed translation client.

use std::time::Instant as StdInstant;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use transgate_core::{CallContext, ProviderConfig, TranslationClientPort, TranslationError};

use crate::config::UpstreamClientConfig;
use crate::wire::{ChatCompletionPayload, extract_translation};

/// Production translation client over a pooled `reqwest::Client`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTranslationClient {
    client: reqwest::Client,
}

impl ReqwestTranslationClient {
    /// Build the client and its connection pool.
    pub fn new(config: &UpstreamClientConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// One POST to the provider and one parse of its answer.
    async fn execute(
        &self,
        text: &str,
        provider: &ProviderConfig,
    ) -> Result<String, TranslationError> {
        let payload = ChatCompletionPayload::for_translation(provider, text);
        let body =
            serde_json::to_vec(&payload).map_err(|e| TranslationError::Internal(e.to_string()))?;

        let response = self
            .client
            .post(&provider.api_url)
            .bearer_auth(&provider.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!(
                provider = %provider.kind,
                status = status.as_u16(),
                headers = ?headers,
                "Provider returned an error status"
            );
            return Err(TranslationError::Provider {
                status: status.as_u16(),
                body: raw,
            });
        }

        extract_translation(&raw)
    }
}

/// Strip the URL from reqwest errors before they reach logs or callers.
fn transport_error(err: reqwest::Error) -> TranslationError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connect failed"
    } else {
        "request failed"
    };
    TranslationError::Transport(format!("{kind}: {}", err.without_url()))
}

#[async_trait]
impl TranslationClientPort for ReqwestTranslationClient {
    async fn translate(
        &self,
        ctx: &CallContext,
        text: &str,
        provider: &ProviderConfig,
    ) -> Result<String, TranslationError> {
        let started = StdInstant::now();
        debug!(
            provider = %provider.kind,
            model = %provider.model_name,
            text_len = text.len(),
            "Sending translation request upstream"
        );

        tokio::select! {
            biased;
            () = ctx.cancelled() => {
                debug!(provider = %provider.kind, "Upstream call cancelled by caller");
                Err(TranslationError::Cancelled)
            }
            result = tokio::time::timeout_at(ctx.deadline(), self.execute(text, provider)) => {
                match result {
                    Ok(outcome) => outcome,
                    Err(_) => Err(TranslationError::Timeout(started.elapsed())),
                }
            }
        }
    }
}
