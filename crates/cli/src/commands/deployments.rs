//! Deployment commands.
//!
//! Responsibilities:
//! - List, show, create and delete deployments.
//! - Retry a failed deployment and follow it until it settles or the retry
//!   cutoff passes.
//! - Watch a provisioning deployment.
//!
//! Does NOT handle:
//! - Input validation rules (see `ProvisionWizard` in the client crate).
//!
//! Invariants:
//! - `create` validates required inputs locally before anything is sent.
//! - A watch that reaches its cutoff is not an error; the last known state
//!   is printed with a warning.
//! - Ctrl+C during a watch drops the poll loop; nothing is fetched after.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;
use tracing::{info, warn};

use provisio_client::views::wizard::ProvisionWizard;
use provisio_client::{
    ClientError, Deployment, DeploymentFilter, ListQuery, ProvisioningClient, WatchOutcome,
};
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client, parse_key_value};
use crate::formatters::{ActionOutput, Pagination};
use crate::interactive::confirm_delete;
use crate::progress::Spinner;

#[derive(Debug, Subcommand)]
pub enum DeploymentsCommand {
    /// List deployments in the active business unit
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
        /// Only deployments in this status (e.g., provisioning, active, failed)
        #[arg(long)]
        status: Option<String>,
        /// Only deployments of this plugin
        #[arg(long)]
        plugin: Option<String>,
    },
    /// Show one deployment
    Get {
        /// Deployment ID
        id: String,
    },
    /// Provision a new deployment from a plugin
    Create {
        /// Plugin ID
        #[arg(short, long)]
        plugin: String,
        /// Deployment name
        #[arg(short, long)]
        name: String,
        /// Plugin version (defaults to the plugin's current version)
        #[arg(long)]
        version: Option<String>,
        /// Plugin input as KEY=VALUE (repeatable; VALUE may be JSON)
        #[arg(short, long = "input", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        inputs: Vec<(String, Value)>,
        /// Follow the deployment until it leaves `provisioning`
        #[arg(short, long)]
        watch: bool,
    },
    /// Delete a deployment
    Delete {
        /// Deployment ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Retry a failed deployment and follow it
    Retry {
        /// Deployment ID
        id: String,
    },
    /// Follow a deployment until it leaves `provisioning`
    Watch {
        /// Deployment ID
        id: String,
        /// Give up after this many seconds (default: no limit)
        #[arg(long, value_name = "SECS")]
        max_wait: Option<u64>,
    },
}

pub async fn run(
    config: Config,
    command: DeploymentsCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        DeploymentsCommand::List {
            page,
            page_size,
            search,
            status,
            plugin,
        } => {
            let mut query = ListQuery::new().page(page).page_size(page_size);
            if let Some(term) = search {
                query = query.search(term);
            }
            let filter = DeploymentFilter {
                status,
                plugin_id: plugin,
            };
            let result = cancellable!(client.list_deployments(&query, &filter), cancel)?;
            let pagination = Pagination::from_page(&result);
            output.emit(|f| f.format_deployments(&result.items, Some(pagination)))
        }
        DeploymentsCommand::Get { id } => {
            let deployment = cancellable!(client.get_deployment(&id), cancel)?;
            output.emit(|f| f.format_deployment(&deployment))
        }
        DeploymentsCommand::Create {
            plugin,
            name,
            version,
            inputs,
            watch,
        } => run_create(&client, &plugin, name, version, inputs, watch, output, cancel).await,
        DeploymentsCommand::Delete { id, force } => {
            if !force && !confirm_delete(&id, "deployment")? {
                return Ok(());
            }
            cancellable!(client.delete_deployment(&id), cancel)?;
            info!(id = %id, "Deployment deletion requested");
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "delete",
                    &id,
                    format!("Deployment '{}' is being deleted.", id),
                ))
            })
        }
        DeploymentsCommand::Retry { id } => {
            let spinner = Spinner::new(output.show_progress(), format!("Retrying {}", id));
            let outcome = cancellable!(
                client.retry_and_watch(&id, |d| spinner.set_detail(d.status.as_str())),
                cancel
            )?;
            finish_watch(&spinner, &id, outcome, output)
        }
        DeploymentsCommand::Watch { id, max_wait } => {
            let limit = max_wait.map(Duration::from_secs);
            let deployment = watch(&client, &id, limit, output, cancel).await?;
            output.emit(|f| f.format_deployment(&deployment))
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_create(
    client: &ProvisioningClient,
    plugin_id: &str,
    name: String,
    version: Option<String>,
    inputs: Vec<(String, Value)>,
    follow: bool,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let plugin = cancellable!(client.get_plugin(plugin_id), cancel)
        .with_context(|| format!("Failed to load plugin '{}'", plugin_id))?;

    let mut wizard = ProvisionWizard::new();
    wizard
        .select_plugin(plugin)
        .map_err(|issue| ClientError::Validation(issue.message()))?;
    wizard.set_name(name);
    if version.is_some() {
        wizard.set_version(version);
    }
    for (key, value) in inputs {
        wizard.set_input(key, value);
    }
    if let Err(issues) = wizard.review() {
        let messages: Vec<String> = issues.iter().map(|i| i.message()).collect();
        return Err(ClientError::Validation(messages.join("; ")).into());
    }
    let params = wizard.to_params()?;

    let created = cancellable!(client.create_deployment(&params), cancel)?;
    info!(id = %created.id, "Deployment created");

    if follow && created.status.is_provisioning() {
        let settled = watch(client, &created.id, None, output, cancel).await?;
        return output.emit(|f| f.format_deployment(&settled));
    }
    output.emit(|f| f.format_deployment(&created))
}

/// Follow `id` with a spinner. Returns the last known state.
async fn watch(
    client: &ProvisioningClient,
    id: &str,
    limit: Option<Duration>,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<Deployment> {
    let spinner = Spinner::new(output.show_progress(), format!("Watching {}", id));
    let outcome = cancellable!(
        client.watch_deployment(id, limit, |d| spinner.set_detail(d.status.as_str())),
        cancel
    )?;
    match outcome {
        WatchOutcome::Settled(d) => {
            spinner.finish(d.status.as_str());
            Ok(d)
        }
        WatchOutcome::TimedOut { last } => {
            warn!(id, "Stopped watching before the deployment settled");
            eprintln!("Deployment '{}' is still provisioning.", id);
            match last {
                Some(d) => Ok(d),
                None => Ok(cancellable!(client.get_deployment(id), cancel)?),
            }
        }
    }
}

fn finish_watch(
    spinner: &Spinner,
    id: &str,
    outcome: WatchOutcome,
    output: &OutputOptions,
) -> Result<()> {
    match outcome {
        WatchOutcome::Settled(d) => {
            spinner.finish(d.status.as_str());
            output.emit(|f| f.format_deployment(&d))
        }
        WatchOutcome::TimedOut { last } => {
            eprintln!(
                "Deployment '{}' did not settle before the retry cutoff. Check again with `provisio deployments get {}`.",
                id, id
            );
            match last {
                Some(d) => output.emit(|f| f.format_deployment(&d)),
                None => Ok(()),
            }
        }
    }
}
