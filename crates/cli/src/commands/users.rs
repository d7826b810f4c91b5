//! User management commands.
//!
//! Invariants:
//! - Passwords are read from a hidden prompt or stdin, never from argv.
//! - Update sends only the fields that were given.

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use provisio_client::{ClientError, ListQuery, UserParams};
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, Pagination};
use crate::interactive::{confirm_delete, prompt_password, read_password_stdin};

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
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
    /// Show one user
    Get {
        /// User ID
        id: String,
    },
    /// Create a user
    Create {
        /// Email address
        email: String,
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Full name
        #[arg(long)]
        full_name: Option<String>,
        /// Role names (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        roles: Vec<String>,
        /// Read the initial password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },
    /// Modify a user
    Update {
        /// User ID
        id: String,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New full name
        #[arg(long)]
        full_name: Option<String>,
        /// Replace role names (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        roles: Option<Vec<String>>,
        /// Deactivate the account
        #[arg(long, conflicts_with = "activate")]
        deactivate: bool,
        /// Reactivate the account
        #[arg(long)]
        activate: bool,
        /// Prompt for a new password
        #[arg(long)]
        reset_password: bool,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: UsersCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        UsersCommand::List {
            page,
            page_size,
            search,
        } => {
            let mut query = ListQuery::new().page(page).page_size(page_size);
            if let Some(term) = search {
                query = query.search(term);
            }
            let result = cancellable!(client.list_users(&query), cancel)?;
            let pagination = Pagination::from_page(&result);
            output.emit(|f| f.format_users(&result.items, Some(pagination)))
        }
        UsersCommand::Get { id } => {
            let user = cancellable!(client.get_user(&id), cancel)?;
            output.emit(|f| f.format_user(&user))
        }
        UsersCommand::Create {
            email,
            username,
            full_name,
            roles,
            password_stdin,
        } => {
            if !email.contains('@') {
                return Err(
                    ClientError::Validation(format!("'{}' is not an email address", email)).into(),
                );
            }
            let password = if password_stdin {
                read_password_stdin()?
            } else {
                prompt_password("Initial password")?
            };
            let params = UserParams {
                email: Some(email),
                username,
                full_name,
                password: Some(password),
                is_active: None,
                roles: (!roles.is_empty()).then_some(roles),
            };
            let user = cancellable!(client.create_user(&params), cancel)?;
            info!(id = %user.id, "User created");
            output.emit(|f| f.format_user(&user))
        }
        UsersCommand::Update {
            id,
            email,
            full_name,
            roles,
            deactivate,
            activate,
            reset_password,
        } => {
            let password = if reset_password {
                Some(prompt_password("New password")?)
            } else {
                None
            };
            let is_active = match (activate, deactivate) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let params = UserParams {
                email,
                full_name,
                password,
                is_active,
                roles,
                ..Default::default()
            };
            let user = cancellable!(client.update_user(&id, &params), cancel)?;
            output.emit(|f| f.format_user(&user))
        }
        UsersCommand::Delete { id, force } => {
            if !force && !confirm_delete(&id, "user")? {
                return Ok(());
            }
            cancellable!(client.delete_user(&id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "delete",
                    &id,
                    format!("User '{}' deleted.", id),
                ))
            })
        }
    }
}
