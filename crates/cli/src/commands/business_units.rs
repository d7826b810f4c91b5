//! Business unit commands and the active tenant scope.
//!
//! Invariants:
//! - The selected business unit is stored in the session file and sent as
//!   `X-Business-Unit-Id` on every later request.
//! - `select` verifies the unit exists before storing it.
//! - Deleting the active unit clears the selection.

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use provisio_client::{BusinessUnitParams, ClientError, ListQuery};
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, Pagination};
use crate::interactive::confirm_delete;

#[derive(Debug, Subcommand)]
pub enum BusinessUnitsCommand {
    /// List business units
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Show one business unit
    Get {
        /// Business unit ID (UUID)
        id: String,
    },
    /// Create a business unit
    Create {
        /// Name
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Modify a business unit
    Update {
        /// Business unit ID (UUID)
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a business unit
    Delete {
        /// Business unit ID (UUID)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Scope subsequent requests to a business unit
    Select {
        /// Business unit ID (UUID)
        id: String,
    },
    /// Stop scoping requests to a business unit
    Clear,
    /// Show the active business unit
    Current,
}

pub async fn run(
    config: Config,
    command: BusinessUnitsCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        BusinessUnitsCommand::List { page, page_size } => {
            let query = ListQuery::new().page(page).page_size(page_size);
            let result = cancellable!(client.list_business_units(&query), cancel)?;
            let pagination = Pagination::from_page(&result);
            let active = client.active_business_unit();
            output.emit(|f| {
                f.format_business_units(&result.items, active.as_ref(), Some(pagination))
            })
        }
        BusinessUnitsCommand::Get { id } => {
            let unit = cancellable!(client.get_business_unit(&id), cancel)?;
            output.emit(|f| f.format_business_unit(&unit))
        }
        BusinessUnitsCommand::Create { name, description } => {
            if name.trim().is_empty() {
                return Err(
                    ClientError::Validation("Business unit name is required".to_string()).into(),
                );
            }
            let params = BusinessUnitParams {
                name: name.trim().to_string(),
                description,
            };
            let unit = cancellable!(client.create_business_unit(&params), cancel)?;
            info!(id = %unit.id, "Business unit created");
            output.emit(|f| f.format_business_unit(&unit))
        }
        BusinessUnitsCommand::Update {
            id,
            name,
            description,
        } => {
            let existing = cancellable!(client.get_business_unit(&id), cancel)?;
            let params = BusinessUnitParams {
                name: name.unwrap_or(existing.name),
                description: description.or(existing.description),
            };
            let unit = cancellable!(client.update_business_unit(&id, &params), cancel)?;
            output.emit(|f| f.format_business_unit(&unit))
        }
        BusinessUnitsCommand::Delete { id, force } => {
            if !force && !confirm_delete(&id, "business unit")? {
                return Ok(());
            }
            cancellable!(client.delete_business_unit(&id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "delete",
                    &id,
                    format!("Business unit '{}' deleted.", id),
                ))
            })
        }
        BusinessUnitsCommand::Select { id } => {
            let unit = cancellable!(client.get_business_unit(&id), cancel)?;
            client.select_business_unit(&unit);
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "select",
                    &unit.id.to_string(),
                    format!("Active business unit: {} ({})", unit.name, unit.id),
                ))
            })
        }
        BusinessUnitsCommand::Clear => {
            client.clear_business_unit();
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "clear",
                    "business-unit",
                    "Business unit scope cleared.",
                ))
            })
        }
        BusinessUnitsCommand::Current => {
            let message = match client.active_business_unit() {
                Some(bu) => format!("Active business unit: {} ({})", bu.name, bu.id),
                None => "No business unit selected.".to_string(),
            };
            output.emit(|f| f.format_action(&ActionOutput::ok("current", "business-unit", message)))
        }
    }
}
