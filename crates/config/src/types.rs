//! Configuration types for provisio.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeout, login route).
//! - Define polling settings used by the deployment watchers.
//! - Define the main `Config` structure combining them.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Persisting session state (see `persistence` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as whole seconds or milliseconds.
//! - Default values come from `constants`, not magic numbers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_LOGIN_ROUTE, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RETRY_WATCH_SECS,
    DEFAULT_TIMEOUT_SECS,
};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing Duration as milliseconds (integer).
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Connection configuration for the provisioning backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the backend (e.g., https://provisio.example.com)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Route reported to the session-expired hook when a refresh fails
    pub login_route: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }
}

/// Polling behavior for deployment status watchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between status fetches (serialized as milliseconds)
    #[serde(with = "duration_millis")]
    pub interval: Duration,
    /// Hard cutoff for the watch started by a retry (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub retry_timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            retry_timeout: Duration::from_secs(DEFAULT_RETRY_WATCH_SECS),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub polling: PollingConfig,
    /// Explicit session file location; `None` uses the platform default.
    pub session_path: Option<PathBuf>,
}

/// Business unit selected as the active tenant scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnitRef {
    pub id: Uuid,
    pub name: String,
}
