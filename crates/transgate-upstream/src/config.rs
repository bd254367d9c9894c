//! Public configuration for the upstream client.

use std::time::Duration;

/// Transport settings for [`crate::ReqwestTranslationClient`].
///
/// # Example
///
/// ```
/// use transgate_upstream::UpstreamClientConfig;
/// use std::time::Duration;
///
/// let config = UpstreamClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_pool_max_idle_per_host(4);
/// ```
#[derive(Debug, Clone)]
pub struct UpstreamClientConfig {
    /// Whole-request transport timeout, independent of the caller deadline.
    pub(crate) timeout: Duration,
    /// TCP/TLS connect timeout.
    pub(crate) connect_timeout: Duration,
    /// Idle keep-alive connections kept per upstream host.
    pub(crate) pool_max_idle_per_host: usize,
    /// How long an idle pooled connection is kept.
    pub(crate) pool_idle_timeout: Duration,
    /// User agent string for upstream requests.
    pub(crate) user_agent: String,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(25),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Duration::from_secs(30),
            user_agent: concat!("transgate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl UpstreamClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport timeout. Defaults to 25 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout. Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the idle pool size per host. Defaults to 10.
    #[must_use]
    pub const fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the idle connection timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
