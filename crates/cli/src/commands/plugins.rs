//! Plugin catalog commands.
//!
//! Responsibilities:
//! - Browse the catalog with search, type and access filters.
//! - Lock and unlock plugins.
//! - Request access to a locked plugin and review pending requests.
//! - Upload a plugin package.
//!
//! Invariants:
//! - Catalog filtering runs locally over the whole catalog, the same way
//!   the interactive catalog view filters it; every page is fetched first.
//! - Empty packages are rejected before upload.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use tracing::{debug, info};

use provisio_client::views::catalog::{AccessFilter, CatalogView};
use provisio_client::{DeploymentType, ListQuery, Plugin, PluginPackage, ProvisioningClient};
use provisio_config::Config;
use provisio_config::constants::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS, MAX_PAGE_SIZE};

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, Pagination};
use crate::progress::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PluginKind {
    Infrastructure,
    Microservice,
}

impl From<PluginKind> for DeploymentType {
    fn from(kind: PluginKind) -> Self {
        match kind {
            PluginKind::Infrastructure => DeploymentType::Infrastructure,
            PluginKind::Microservice => DeploymentType::Microservice,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PluginsCommand {
    /// List catalog plugins
    List {
        /// Match name, description or tags
        #[arg(short, long)]
        search: Option<String>,
        /// Only plugins of this deployment type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<PluginKind>,
        /// Only plugins you can provision
        #[arg(long, conflicts_with = "locked")]
        available: bool,
        /// Only locked plugins
        #[arg(long)]
        locked: bool,
    },
    /// Show one plugin and its inputs
    Get {
        /// Plugin ID
        id: String,
    },
    /// Lock a plugin so provisioning requires approved access
    Lock {
        /// Plugin ID
        id: String,
    },
    /// Unlock a plugin
    Unlock {
        /// Plugin ID
        id: String,
    },
    /// Ask for access to a locked plugin
    RequestAccess {
        /// Plugin ID
        id: String,
        /// Note for the approver
        #[arg(long)]
        note: Option<String>,
    },
    /// List access requests
    AccessRequests {
        /// Only requests in this status (pending, approved, rejected)
        #[arg(long)]
        status: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Approve an access request
    Approve {
        /// Access request ID
        request_id: String,
    },
    /// Reject an access request
    Reject {
        /// Access request ID
        request_id: String,
        /// Reason shown to the requester
        #[arg(long)]
        note: Option<String>,
    },
    /// Upload a plugin package
    Upload {
        /// Path to the package file (e.g., kafka.zip)
        file: PathBuf,
    },
}

/// Every plugin in the catalog, page by page at the largest page size.
///
/// Stops when the backend reports no further page, returns an empty page,
/// or does not advance the page number.
async fn fetch_catalog(
    client: &ProvisioningClient,
    cancel: &CancellationToken,
) -> Result<Vec<Plugin>> {
    let mut query = ListQuery::new().page(1).page_size(MAX_PAGE_SIZE);
    let mut plugins = Vec::new();
    loop {
        let page = cancellable!(client.list_plugins(&query), cancel)?;
        let more = page.has_next() && !page.items.is_empty() && page.page >= query.page;
        let next = page.page + 1;
        plugins.extend(page.items);
        if !more {
            break;
        }
        debug!(page = next, "Fetching next catalog page");
        query = query.page(next);
    }
    Ok(plugins)
}

pub async fn run(
    config: Config,
    command: PluginsCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        PluginsCommand::List {
            search,
            kind,
            available,
            locked,
        } => {
            let plugins = fetch_catalog(&client, cancel).await?;

            let mut view = CatalogView::new(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS));
            view.set_plugins(plugins);
            if let Some(term) = search {
                view.type_search(&term, Instant::now());
                view.commit_search();
            }
            view.set_deployment_type(kind.map(DeploymentType::from));
            view.set_access_filter(if available {
                AccessFilter::Available
            } else if locked {
                AccessFilter::Locked
            } else {
                AccessFilter::All
            });

            let visible = view.visible();
            output.emit(|f| f.format_plugins(&visible))
        }
        PluginsCommand::Get { id } => {
            let plugin = cancellable!(client.get_plugin(&id), cancel)?;
            output.emit(|f| f.format_plugin(&plugin))
        }
        PluginsCommand::Lock { id } => {
            cancellable!(client.lock_plugin(&id), cancel)?;
            info!(id = %id, "Plugin locked");
            output.emit(|f| {
                f.format_action(&ActionOutput::ok("lock", &id, format!("Plugin '{}' locked.", id)))
            })
        }
        PluginsCommand::Unlock { id } => {
            cancellable!(client.unlock_plugin(&id), cancel)?;
            info!(id = %id, "Plugin unlocked");
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "unlock",
                    &id,
                    format!("Plugin '{}' unlocked.", id),
                ))
            })
        }
        PluginsCommand::RequestAccess { id, note } => {
            cancellable!(client.request_plugin_access(&id, note.as_deref()), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "request-access",
                    &id,
                    format!("Access to plugin '{}' requested.", id),
                ))
            })
        }
        PluginsCommand::AccessRequests {
            status,
            page,
            page_size,
        } => {
            let query = ListQuery::new().page(page).page_size(page_size);
            let result = cancellable!(
                client.list_access_requests(&query, status.as_deref()),
                cancel
            )?;
            let pagination = Pagination::from_page(&result);
            output.emit(|f| f.format_access_requests(&result.items, Some(pagination)))
        }
        PluginsCommand::Approve { request_id } => {
            cancellable!(client.approve_access_request(&request_id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "approve",
                    &request_id,
                    format!("Access request '{}' approved.", request_id),
                ))
            })
        }
        PluginsCommand::Reject { request_id, note } => {
            cancellable!(
                client.reject_access_request(&request_id, note.as_deref()),
                cancel
            )?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "reject",
                    &request_id,
                    format!("Access request '{}' rejected.", request_id),
                ))
            })
        }
        PluginsCommand::Upload { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read plugin package {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "plugin.zip".to_string());
            let package = PluginPackage {
                file_name: file_name.clone(),
                bytes,
            };

            let spinner = Spinner::new(output.show_progress(), format!("Uploading {}", file_name));
            let uploaded = cancellable!(client.upload_plugin(package), cancel)?;
            spinner.finish("done");

            match uploaded {
                Some(plugin) => output.emit(|f| f.format_plugin(&plugin)),
                None => output.emit(|f| {
                    f.format_action(&ActionOutput::ok(
                        "upload",
                        &file_name,
                        format!("Plugin package '{}' uploaded.", file_name),
                    ))
                }),
            }
        }
    }
}
