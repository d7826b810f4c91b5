//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, `.env`, `PROVISIO_*`
//! environment variables, explicit builder overrides.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
