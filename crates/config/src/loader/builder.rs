//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Support loading from `.env`, environment variables, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Persisting session state (see persistence module).
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{MAX_TIMEOUT_SECS, MIN_POLL_INTERVAL_MS};
use crate::types::{Config, ConnectionConfig, PollingConfig};

/// Configuration loader that builds config from defaults, environment, and overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    login_route: Option<String>,
    poll_interval: Option<Duration>,
    retry_timeout: Option<Duration>,
    session_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// Missing `.env` files are silently ignored. If `DOTENV_DISABLED` is set
    /// to "true" or "1" the file is not read at all.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Apply `PROVISIO_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_login_route(mut self, route: String) -> Self {
        self.login_route = Some(route);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn with_retry_timeout(mut self, timeout: Duration) -> Self {
        self.retry_timeout = Some(timeout);
        self
    }

    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = Some(path);
        self
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_login_route(&mut self, route: Option<String>) {
        self.login_route = route;
    }

    pub(crate) fn set_poll_interval(&mut self, interval: Option<Duration>) {
        self.poll_interval = interval;
    }

    pub(crate) fn set_retry_timeout(&mut self, timeout: Option<Duration>) {
        self.retry_timeout = timeout;
    }

    pub(crate) fn set_session_path(&mut self, path: Option<PathBuf>) {
        self.session_path = path;
    }

    /// Validate the collected values and build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = ConnectionConfig::default();
        let polling_defaults = PollingConfig::default();

        let base_url = self.base_url.unwrap_or(defaults.base_url);
        validate_base_url(&base_url)?;

        let timeout = self.timeout.unwrap_or(defaults.timeout);
        if timeout.is_zero() || timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "must be between 1 and {} seconds (got {})",
                    MAX_TIMEOUT_SECS,
                    timeout.as_secs()
                ),
            });
        }

        let interval = self.poll_interval.unwrap_or(polling_defaults.interval);
        if interval < Duration::from_millis(MIN_POLL_INTERVAL_MS) {
            return Err(ConfigError::InvalidPollInterval {
                message: format!(
                    "must be at least {}ms (got {}ms)",
                    MIN_POLL_INTERVAL_MS,
                    interval.as_millis()
                ),
            });
        }

        let login_route = self.login_route.unwrap_or(defaults.login_route);

        Ok(Config {
            connection: ConnectionConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                skip_verify: self.skip_verify.unwrap_or(defaults.skip_verify),
                timeout,
                login_route,
            },
            polling: PollingConfig {
                interval,
                retry_timeout: self.retry_timeout.unwrap_or(polling_defaults.retry_timeout),
            },
            session_path: self.session_path,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}
