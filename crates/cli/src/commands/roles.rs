//! Roles and permissions command implementation.
//!
//! Responsibilities:
//! - List, show, create, update and delete roles.
//! - List the permission catalogue.
//!
//! Does NOT handle:
//! - Slug normalisation rules (see `provisio_client::permissions`).
//!
//! Invariants:
//! - Permissions are checked against the catalogue before sending; unknown
//!   slugs are reported on stderr and left out of the request.
//! - Business-unit prefixes on stored slugs are stripped on load, so an
//!   update never sends them back.
//! - Delete operations require confirmation unless --force is used.

use anyhow::Result;
use clap::Subcommand;
use tracing::{info, warn};

use provisio_client::views::roles::RoleEditor;
use provisio_client::{ClientError, ListQuery};
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, Pagination};
use crate::interactive::confirm_delete;

#[derive(Debug, Subcommand)]
pub enum RolesCommand {
    /// List roles
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
    },
    /// Show one role and its permissions
    Get {
        /// Role ID
        id: String,
    },
    /// List every permission a role can grant
    Permissions,
    /// Create a new role
    Create {
        /// Role name
        name: String,
        /// Role description
        #[arg(short, long)]
        description: Option<String>,
        /// Permissions to grant (comma-separated slugs)
        #[arg(short, long, value_delimiter = ',')]
        permissions: Vec<String>,
    },
    /// Modify an existing role
    Update {
        /// Role ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Replace all permissions (comma-separated slugs)
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["add", "remove"])]
        permissions: Option<Vec<String>>,
        /// Permissions to grant in addition (comma-separated slugs)
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,
        /// Permissions to revoke (comma-separated slugs)
        #[arg(long, value_delimiter = ',')]
        remove: Vec<String>,
    },
    /// Delete a role
    Delete {
        /// Role ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: RolesCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        RolesCommand::List {
            page,
            page_size,
            search,
        } => {
            let mut query = ListQuery::new().page(page).page_size(page_size);
            if let Some(term) = search {
                query = query.search(term);
            }
            let result = cancellable!(client.list_roles(&query), cancel)?;
            let pagination = Pagination::from_page(&result);
            output.emit(|f| f.format_roles(&result.items, Some(pagination)))
        }
        RolesCommand::Get { id } => {
            let role = cancellable!(client.get_role(&id), cancel)?;
            output.emit(|f| f.format_role(&role))
        }
        RolesCommand::Permissions => {
            let permissions = cancellable!(client.list_permissions(), cancel)?;
            output.emit(|f| f.format_permissions(&permissions))
        }
        RolesCommand::Create {
            name,
            description,
            permissions,
        } => {
            if name.trim().is_empty() {
                return Err(ClientError::Validation("Role name is required".to_string()).into());
            }
            let catalogue = cancellable!(client.list_permissions(), cancel)?;
            let mut editor = RoleEditor::new(catalogue);
            editor.set_name(name);
            editor.set_description(description);
            for slug in &permissions {
                editor.select(slug);
            }
            report_unknown(&editor);

            let params = editor.to_params();
            let role = cancellable!(client.create_role(&params), cancel)?;
            info!(id = %role.id, "Role created");
            output.emit(|f| f.format_role(&role))
        }
        RolesCommand::Update {
            id,
            name,
            description,
            permissions,
            add,
            remove,
        } => {
            let existing = cancellable!(client.get_role(&id), cancel)?;
            let catalogue = cancellable!(client.list_permissions(), cancel)?;
            let mut editor = RoleEditor::from_role(&existing, catalogue);

            if let Some(name) = name {
                editor.set_name(name);
            }
            if description.is_some() {
                editor.set_description(description);
            }
            if let Some(replacement) = permissions {
                for slug in &existing.permissions {
                    editor.deselect(slug);
                }
                for slug in &replacement {
                    editor.select(slug);
                }
            }
            for slug in &add {
                editor.select(slug);
            }
            for slug in &remove {
                editor.deselect(slug);
            }
            report_unknown(&editor);

            let params = editor.to_params();
            let role = cancellable!(client.update_role(&id, &params), cancel)?;
            info!(id = %role.id, "Role updated");
            output.emit(|f| f.format_role(&role))
        }
        RolesCommand::Delete { id, force } => {
            if !force && !confirm_delete(&id, "role")? {
                return Ok(());
            }
            cancellable!(client.delete_role(&id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "delete",
                    &id,
                    format!("Role '{}' deleted.", id),
                ))
            })
        }
    }
}

fn report_unknown(editor: &RoleEditor) {
    let resolved = editor.resolve();
    if !resolved.unknown.is_empty() {
        warn!(unknown = ?resolved.unknown, "Dropping unknown permissions");
        eprintln!(
            "Ignoring unknown permissions: {}",
            resolved.unknown.join(", ")
        );
    }
}
