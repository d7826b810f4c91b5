//! Group commands: CRUD and membership.

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use provisio_client::{ClientError, GroupParams, ListQuery};
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, Pagination};
use crate::interactive::confirm_delete;

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups
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
    /// Show one group
    Get {
        /// Group ID
        id: String,
    },
    /// Create a group
    Create {
        /// Group name
        name: String,
        /// Group description
        #[arg(short, long)]
        description: Option<String>,
        /// Role IDs granted to members (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Modify a group
    Update {
        /// Group ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Replace the granted role IDs (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        roles: Option<Vec<String>>,
    },
    /// Delete a group
    Delete {
        /// Group ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Add a user to a group
    AddMember {
        /// Group ID
        group_id: String,
        /// User ID
        user_id: String,
    },
    /// Remove a user from a group
    RemoveMember {
        /// Group ID
        group_id: String,
        /// User ID
        user_id: String,
    },
}

pub async fn run(
    config: Config,
    command: GroupsCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        GroupsCommand::List {
            page,
            page_size,
            search,
        } => {
            let mut query = ListQuery::new().page(page).page_size(page_size);
            if let Some(term) = search {
                query = query.search(term);
            }
            let result = cancellable!(client.list_groups(&query), cancel)?;
            let pagination = Pagination::from_page(&result);
            output.emit(|f| f.format_groups(&result.items, Some(pagination)))
        }
        GroupsCommand::Get { id } => {
            let group = cancellable!(client.get_group(&id), cancel)?;
            output.emit(|f| f.format_group(&group))
        }
        GroupsCommand::Create {
            name,
            description,
            roles,
        } => {
            if name.trim().is_empty() {
                return Err(ClientError::Validation("Group name is required".to_string()).into());
            }
            let params = GroupParams {
                name: name.trim().to_string(),
                description,
                role_ids: roles,
            };
            let group = cancellable!(client.create_group(&params), cancel)?;
            info!(id = %group.id, "Group created");
            output.emit(|f| f.format_group(&group))
        }
        GroupsCommand::Update {
            id,
            name,
            description,
            roles,
        } => {
            let existing = cancellable!(client.get_group(&id), cancel)?;
            let params = GroupParams {
                name: name.unwrap_or(existing.name),
                description: description.or(existing.description),
                role_ids: roles.unwrap_or(existing.role_ids),
            };
            let group = cancellable!(client.update_group(&id, &params), cancel)?;
            output.emit(|f| f.format_group(&group))
        }
        GroupsCommand::Delete { id, force } => {
            if !force && !confirm_delete(&id, "group")? {
                return Ok(());
            }
            cancellable!(client.delete_group(&id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "delete",
                    &id,
                    format!("Group '{}' deleted.", id),
                ))
            })
        }
        GroupsCommand::AddMember { group_id, user_id } => {
            cancellable!(client.add_group_member(&group_id, &user_id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "add-member",
                    &group_id,
                    format!("User '{}' added to group '{}'.", user_id, group_id),
                ))
            })
        }
        GroupsCommand::RemoveMember { group_id, user_id } => {
            cancellable!(client.remove_group_member(&group_id, &user_id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "remove-member",
                    &group_id,
                    format!("User '{}' removed from group '{}'.", user_id, group_id),
                ))
            })
        }
    }
}
