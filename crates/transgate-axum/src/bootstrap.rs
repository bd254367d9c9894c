//! Composition root for the gateway.
//!
//! Loads the provider config file, builds the registry and the upstream
//! client, and hands the assembled [`GatewayContext`] to the router.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use transgate_core::{
    ConfigSource, GatewayConfig, ProviderRegistry, TranslationClientPort, default_config_path,
};
use transgate_upstream::{ReqwestTranslationClient, UpstreamClientConfig};

use crate::routes::create_router;
use crate::server::GatewayServer;

/// Default per-request deadline for the upstream call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

/// Default drain deadline on shutdown.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (`Access-Control-Allow-Origin: *`).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port override. `None` uses the port from the config file.
    pub port: Option<u16>,
    /// Path of the persisted provider configuration.
    pub config_path: PathBuf,
    /// Deadline for one upstream translation.
    pub request_timeout: Duration,
    /// Maximum accepted request body.
    pub max_body_bytes: usize,
    /// How long shutdown waits for in-flight requests.
    pub shutdown_grace: Duration,
    /// Upstream transport settings.
    pub upstream: UpstreamClientConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            host: "0.0.0.0".to_string(),
            port: None,
            config_path: default_config_path()?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            upstream: UpstreamClientConfig::default(),
            cors: CorsConfig::default(),
        })
    }

    /// Use a specific config file.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct GatewayContext {
    /// Named providers and the default selection.
    pub registry: Arc<ProviderRegistry>,
    /// Upstream chat-completion client.
    pub client: Arc<dyn TranslationClientPort>,
    /// Deadline applied to each translation.
    pub request_timeout: Duration,
    /// Body limit for the translate routes.
    pub max_body_bytes: usize,
    /// Port the listener should bind.
    pub listen_port: u16,
    /// When this context was assembled.
    pub started_at: DateTime<Utc>,
}

impl GatewayContext {
    /// Context with default limits; mainly for tests and embedding.
    pub fn new(registry: ProviderRegistry, client: Arc<dyn TranslationClientPort>) -> Self {
        Self {
            registry: Arc::new(registry),
            client,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            listen_port: transgate_core::DEFAULT_PORT,
            started_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }
}

impl fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayContext")
            .field("models", &self.registry.model_types())
            .field("default_model", &self.registry.default_model())
            .field("request_timeout", &self.request_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("listen_port", &self.listen_port)
            .finish_non_exhaustive()
    }
}

/// Bootstrap the gateway services.
///
/// A malformed config file or a default model that is not registered stops
/// startup here.
pub fn bootstrap(config: &ServerConfig) -> Result<GatewayContext> {
    info!(config = %config.config_path.display(), "Loading provider config");

    let (file, source) = GatewayConfig::load_or_create(&config.config_path)
        .with_context(|| format!("Failed to load {}", config.config_path.display()))?;
    if source == ConfigSource::CreatedDefault {
        info!(
            config = %config.config_path.display(),
            "Created default config file; fill in apiKey values before use"
        );
    }

    let registry = ProviderRegistry::from_config(&file).context("Invalid provider config")?;
    if registry.is_empty() {
        warn!("No providers configured; only inline requests can be served");
    }
    for name in file.models_missing_credentials() {
        warn!(model_type = name, "Provider has no apiKey configured");
    }

    let client = ReqwestTranslationClient::new(&config.upstream)
        .context("Failed to build upstream HTTP client")?;

    info!(
        models = ?registry.model_types(),
        default_model = registry.default_model().unwrap_or("<none>"),
        "Provider registry ready"
    );

    Ok(GatewayContext {
        registry: Arc::new(registry),
        client: Arc::new(client),
        request_timeout: config.request_timeout,
        max_body_bytes: config.max_body_bytes,
        listen_port: config.port.unwrap_or(file.port),
        started_at: Utc::now(),
    })
}

/// Bootstrap, serve, and drain once `shutdown` resolves.
pub async fn start_server<F>(config: ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let ctx = bootstrap(&config)?;
    let port = ctx.listen_port;
    let router = create_router(ctx, &config.cors);

    let server = GatewayServer::bind(router, &config.host, port, config.shutdown_grace).await?;
    info!(
        "transgate listening on http://{} (translate: POST /translate, /api/v1/translate)",
        server.local_addr()
    );

    server.run_until(shutdown).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: None,
            config_path: dir.join("config.json"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            upstream: UpstreamClientConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    #[test]
    fn test_bootstrap_creates_default_config() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());

        let ctx = bootstrap(&config).unwrap();
        assert!(config.config_path.exists());
        assert_eq!(ctx.registry.default_model(), Some("deepseek"));
        assert_eq!(ctx.listen_port, transgate_core::DEFAULT_PORT);
    }

    #[test]
    fn test_port_override_wins() {
        let temp = tempdir().unwrap();
        let mut config = config_in(temp.path());
        config.port = Some(9123);

        let ctx = bootstrap(&config).unwrap();
        assert_eq!(ctx.listen_port, 9123);
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        std::fs::write(&config.config_path, "not json").unwrap();

        assert!(bootstrap(&config).is_err());
    }

    #[test]
    fn test_empty_registry_still_boots() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        std::fs::write(&config.config_path, r#"{"defaultModel":"","models":{}}"#).unwrap();

        let ctx = bootstrap(&config).unwrap();
        assert!(ctx.registry.is_empty());
        assert_eq!(ctx.registry.default_model(), None);
    }

    #[test]
    fn test_unregistered_default_is_fatal() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        std::fs::write(
            &config.config_path,
            r#"{"defaultModel":"missing","models":{}}"#,
        )
        .unwrap();

        let err = bootstrap(&config).unwrap_err();
        assert!(format!("{err:#}").contains("missing"));
    }
}
