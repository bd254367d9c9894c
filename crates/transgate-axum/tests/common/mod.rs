//! Shared fixtures for gateway integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;
use transgate_axum::{CorsConfig, GatewayContext, create_router};
use transgate_core::{
    CallContext, ProviderConfig, ProviderRegistry, TranslationClientPort, TranslationError,
};

/// What the stub does when called.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Answer with this translation.
    Reply(String),
    /// Echo the input prefixed with the provider's model name.
    Echo,
    /// Fail like an upstream that returned `status` with `body`.
    ProviderError { status: u16, body: String },
    /// Never answer; honour the context deadline and cancellation.
    Stall,
}

/// Hand-written `TranslationClientPort` that records its calls.
#[derive(Debug)]
pub struct StubClient {
    behavior: StubBehavior,
    calls: AtomicUsize,
    providers: Mutex<Vec<ProviderConfig>>,
}

impl StubClient {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            providers: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_provider(&self) -> Option<ProviderConfig> {
        self.providers.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TranslationClientPort for StubClient {
    async fn translate(
        &self,
        ctx: &CallContext,
        text: &str,
        provider: &ProviderConfig,
    ) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.providers.lock().unwrap().push(provider.clone());

        match &self.behavior {
            StubBehavior::Reply(out) => Ok(out.clone()),
            StubBehavior::Echo => Ok(format!("[{}] {text}", provider.model_name)),
            StubBehavior::ProviderError { status, body } => Err(TranslationError::Provider {
                status: *status,
                body: body.clone(),
            }),
            StubBehavior::Stall => {
                let started = tokio::time::Instant::now();
                tokio::select! {
                    () = ctx.cancelled() => Err(TranslationError::Cancelled),
                    () = tokio::time::sleep_until(ctx.deadline()) => {
                        Err(TranslationError::Timeout(started.elapsed()))
                    }
                }
            }
        }
    }
}

/// Registry with `deepseek` (default) and `openai`.
pub fn test_registry() -> ProviderRegistry {
    let providers = BTreeMap::from([
        (
            "deepseek".to_string(),
            ProviderConfig::new(
                "deepseek",
                "sk-deepseek",
                "http://127.0.0.1:1/v1/chat/completions",
                "deepseek-chat",
                "Translate.",
            ),
        ),
        (
            "openai".to_string(),
            ProviderConfig::new(
                "openai",
                "sk-openai",
                "http://127.0.0.1:1/v1/chat/completions",
                "gpt-4o-mini",
                "Translate.",
            ),
        ),
    ]);
    ProviderRegistry::new(providers, Some("deepseek".to_string())).unwrap()
}

pub fn test_context(client: Arc<StubClient>) -> GatewayContext {
    GatewayContext::new(test_registry(), client)
}

pub fn test_router(client: Arc<StubClient>) -> Router {
    create_router(test_context(client), &CorsConfig::AllowAll)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request through the router and collect the response.
pub async fn send(router: Router, request: Request<Body>) -> (Response<()>, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes().to_vec();
    (Response::from_parts(parts, ()), bytes)
}

pub fn json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap()
}

/// Upper bound used by timing assertions.
pub const SLACK: Duration = Duration::from_secs(3);
