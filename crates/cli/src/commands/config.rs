//! Configuration inspection.
//!
//! Shows the configuration after `.env`, environment and CLI overrides
//! are merged. Nothing here writes configuration; settings live in the
//! environment.

use anyhow::Result;
use clap::Subcommand;

use provisio_config::Config;

use crate::commands::{OutputOptions, session_path};
use crate::formatters::ActionOutput;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration
    Show,
    /// Print the session file location
    SessionPath,
}

pub fn run(config: Config, command: ConfigCommand, output: &OutputOptions) -> Result<()> {
    match command {
        ConfigCommand::Show => output.emit(|f| f.format_config(&config)),
        ConfigCommand::SessionPath => {
            let path = session_path(&config)?;
            let message = if path.exists() {
                path.display().to_string()
            } else {
                format!("{} (not created yet)", path.display())
            };
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "session-path",
                    &path.display().to_string(),
                    message,
                ))
            })
        }
    }
}
