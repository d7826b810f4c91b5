//! Configuration management for provisio.
//!
//! This crate provides configuration loading from environment variables and
//! `.env` files, plus the small amount of client-side state (access token,
//! active business unit) persisted between runs.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{SessionFile, SessionState, SessionStoreError, default_session_path};
pub use types::{BusinessUnitRef, Config, ConnectionConfig, PollingConfig};
