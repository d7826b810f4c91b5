//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `PROVISIO_*` environment variables.
//! - Apply them to a `ConfigLoader` instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - `PROVISIO_API_URL` wins over the legacy `VITE_API_URL`.
//! - Invalid numeric values return `ConfigError::InvalidValue`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("PROVISIO_API_URL").or_else(|| env_var_or_none("VITE_API_URL"))
    {
        loader.set_base_url(Some(url));
    }
    if let Some(skip) = parse_env::<bool>("PROVISIO_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("PROVISIO_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(ms) = parse_env::<u64>("PROVISIO_POLL_INTERVAL_MS", "must be a number")? {
        loader.set_poll_interval(Some(Duration::from_millis(ms)));
    }
    if let Some(secs) = parse_env::<u64>("PROVISIO_WATCH_TIMEOUT", "must be a number")? {
        loader.set_retry_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(route) = env_var_or_none("PROVISIO_LOGIN_ROUTE") {
        loader.set_login_route(Some(route));
    }
    if let Some(path) = env_var_or_none("PROVISIO_SESSION_FILE") {
        loader.set_session_path(Some(PathBuf::from(path)));
    }
    Ok(())
}
