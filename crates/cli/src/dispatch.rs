//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//! - Resolve output options once for every command.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands::{self, OutputOptions};
use crate::config_context::ConfigCommandContext;

pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell);
    }

    let output = OutputOptions::new(&cli.output, cli.output_file.clone(), cli.quiet)?;
    let config = config.into_real_config()?;

    match cli.command {
        Commands::Auth { command } => commands::auth::run(config, command, &output, cancel).await,
        Commands::Deployments { command } => {
            commands::deployments::run(config, command, &output, cancel).await
        }
        Commands::Plugins { command } => {
            commands::plugins::run(config, command, &output, cancel).await
        }
        Commands::Roles { command } => commands::roles::run(config, command, &output, cancel).await,
        Commands::Groups { command } => {
            commands::groups::run(config, command, &output, cancel).await
        }
        Commands::Users { command } => commands::users::run(config, command, &output, cancel).await,
        Commands::Audit { command } => commands::audit::run(config, command, &output, cancel).await,
        Commands::BusinessUnits { command } => {
            commands::business_units::run(config, command, &output, cancel).await
        }
        Commands::Cost { command } => commands::cost::run(config, command, &output, cancel).await,
        Commands::Notifications { command } => {
            commands::notifications::run(config, command, &output, cancel).await
        }
        Commands::Config { command } => commands::config::run(config, command, &output),
        Commands::Completions { .. } => Ok(()),
    }
}
