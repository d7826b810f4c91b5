//! Client builder for constructing [`ProvisioningClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout, redirects, TLS
//!   verification, cookie store for the refresh cookie)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`ProvisioningClient`] methods)
//! - Loading configuration from the environment (see `provisio-config`)
//!
//! # Invariants
//! - `base_url` is required and must use `http` or `https`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP URLs log a warning
//! - Without an explicit session store the client starts with an empty
//!   in-memory session

use std::sync::Arc;
use std::time::Duration;

use provisio_config::{
    Config, PollingConfig,
    constants::{DEFAULT_LOGIN_ROUTE, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS},
};

use crate::auth::{MemorySessionStore, SessionStore};
use crate::client::{ProvisioningClient, SessionExpiredHook};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`ProvisioningClient`].
///
/// ```rust,ignore
/// use provisio_client::{FileSessionStore, ProvisioningClient};
///
/// let client = ProvisioningClient::builder()
///     .from_config(&config)
///     .session_store(Arc::new(FileSessionStore::open(file)?))
///     .on_session_expired(|route| eprintln!("Please log in again ({route})"))
///     .build()?;
/// ```
pub struct ProvisioningClientBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    session: Option<Arc<dyn SessionStore>>,
    login_route: String,
    on_session_expired: Option<SessionExpiredHook>,
    metrics: Option<MetricsCollector>,
    polling: PollingConfig,
}

impl Default for ProvisioningClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session: None,
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            on_session_expired: None,
            metrics: None,
            polling: PollingConfig::default(),
        }
    }
}

impl ProvisioningClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL, e.g. `https://provisio.example.com`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against development backends with self-signed
    /// certificates.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use `store` for the access token and active business unit.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Start with an in-memory session holding `token`.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.session = Some(Arc::new(MemorySessionStore::with_token(token)));
        self
    }

    /// Route passed to the session-expired hook. Default is `/login`.
    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Run `hook` when a rejected token cannot be refreshed.
    pub fn on_session_expired<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    /// Record request metrics through the `metrics` facade.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Set deployment polling behaviour.
    pub fn polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    /// Pre-configure the builder from loaded configuration.
    ///
    /// The session store is not part of [`Config`]; callers pick one
    /// separately.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.login_route = config.connection.login_route.clone();
        self.polling = config.polling;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`ProvisioningClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not
    /// an http(s) URL, and [`ClientError::HttpError`] if the HTTP client
    /// fails to build.
    pub fn build(self) -> Result<ProvisioningClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let is_https = base_url.starts_with("https://");
        if !is_https && !base_url.starts_with("http://") {
            return Err(ClientError::InvalidUrl(format!(
                "base_url must start with http:// or https://: {}",
                base_url
            )));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .cookie_store(true);

        if self.skip_verify {
            if is_https {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()));

        Ok(ProvisioningClient {
            http,
            base_url,
            session,
            refresh_lock: tokio::sync::Mutex::new(()),
            login_route: self.login_route,
            on_session_expired: self.on_session_expired,
            metrics: self.metrics,
            polling: self.polling,
        })
    }
}
