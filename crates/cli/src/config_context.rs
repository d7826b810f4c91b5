//! Configuration context for command execution.
//!
//! Invariants:
//! - Placeholder configs cannot be used for actual backend connections.
//! - Real configs are validated before command execution.

use provisio_config::Config;

/// Context for command execution, distinguishing between real and placeholder configs.
///
/// Shell completion generation never talks to the backend, so it runs with a
/// placeholder and does not fail on a broken environment.
pub(crate) enum ConfigCommandContext {
    /// A validated config built from environment and CLI args.
    Real(Box<Config>),
    /// Only valid for commands that never build a client.
    Placeholder,
}

impl ConfigCommandContext {
    /// Extract the real config, failing if this is a placeholder.
    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder => {
                anyhow::bail!(
                    "Internal error: attempted to use placeholder config for an operation requiring real connection details"
                )
            }
        }
    }
}
