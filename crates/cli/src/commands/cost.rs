//! Cost report commands.

use anyhow::Result;
use clap::Subcommand;

use provisio_config::Config;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};

#[derive(Debug, Subcommand)]
pub enum CostCommand {
    /// Cost totals for the active business unit
    Summary {
        /// Billing period (e.g., 2024-05); defaults to the current period
        #[arg(long)]
        period: Option<String>,
    },
    /// Cost breakdown of one deployment
    Deployment {
        /// Deployment ID
        id: String,
    },
}

pub async fn run(
    config: Config,
    command: CostCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        CostCommand::Summary { period } => {
            let summary = cancellable!(client.cost_summary(period.as_deref()), cancel)?;
            output.emit(|f| f.format_cost_summary(&summary))
        }
        CostCommand::Deployment { id } => {
            let cost = cancellable!(client.deployment_cost(&id), cancel)?;
            output.emit(|f| f.format_deployment_cost(&cost))
        }
    }
}
