//! Command implementations for `provisio`.
//!
//! Responsibilities:
//! - Build a session-backed client from the resolved configuration.
//! - Hold the output options every command renders through.
//! - Parse shared argument shapes (`key=value` inputs).
//!
//! Does NOT handle:
//! - Argument definitions for the top level (see `args`).
//! - Request plumbing (handled by the client crate).
//!
//! Invariants:
//! - Every command shares the same session file, so a login in one process
//!   is visible to the next.
//! - The session-expired hook only prints; the command then fails with
//!   `SessionExpired` and exit code 2.

pub mod audit;
pub mod auth;
pub mod business_units;
pub mod completions;
pub mod config;
pub mod cost;
pub mod deployments;
pub mod groups;
pub mod notifications;
pub mod plugins;
pub mod roles;
pub mod users;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use provisio_client::{FileSessionStore, MetricsCollector, ProvisioningClient};
use provisio_config::{Config, SessionFile, default_session_path};

use crate::formatters::{Formatter, OutputFormat, get_formatter, output_result};

/// How and where a command prints its result.
#[derive(Debug, Clone)]
pub(crate) struct OutputOptions {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
    pub quiet: bool,
}

impl OutputOptions {
    pub(crate) fn new(format: &str, file: Option<PathBuf>, quiet: bool) -> Result<Self> {
        Ok(Self {
            format: OutputFormat::from_str(format)?,
            file,
            quiet,
        })
    }

    /// Render with the selected formatter and write the result.
    pub(crate) fn emit<F>(&self, render: F) -> Result<()>
    where
        F: FnOnce(&dyn Formatter) -> Result<String>,
    {
        let formatter = get_formatter(self.format);
        let output = render(formatter.as_ref())?;
        output_result(&output, self.format, self.file.as_ref())
    }

    /// Spinners draw on stderr and stay off under `--quiet`.
    pub(crate) fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Resolve where the session lives: the configured path or the platform default.
pub(crate) fn session_path(config: &Config) -> Result<PathBuf> {
    match &config.session_path {
        Some(path) => Ok(path.clone()),
        None => default_session_path().context("Failed to resolve session file location"),
    }
}

/// Build a client that reads and writes the shared session file.
pub(crate) fn build_client(config: &Config) -> Result<ProvisioningClient> {
    let path = session_path(config)?;
    debug!(path = %path.display(), "Opening session file");
    let store = FileSessionStore::open(SessionFile::new(path))
        .context("Failed to open session file")?;

    let client = ProvisioningClient::builder()
        .from_config(config)
        .session_store(Arc::new(store))
        .metrics(MetricsCollector::new())
        .on_session_expired(|_route| {
            eprintln!("Session expired. Run `provisio auth login` to sign in again.");
        })
        .build()?;
    Ok(client)
}

/// Parse a `key=value` pair. The value is read as JSON when it parses as
/// JSON (numbers, booleans, arrays) and as a plain string otherwise.
pub(crate) fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
