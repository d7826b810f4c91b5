//! Notification commands.

use anyhow::Result;
use clap::Subcommand;

use provisio_client::ListQuery;
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, Pagination};

#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List notifications
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every notification as read
    ReadAll,
}

pub async fn run(
    config: Config,
    command: NotificationsCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        NotificationsCommand::List {
            unread,
            page,
            page_size,
        } => {
            let query = ListQuery::new().page(page).page_size(page_size);
            let result = cancellable!(client.list_notifications(&query, unread), cancel)?;
            let pagination = Pagination::from_page(&result);
            output.emit(|f| f.format_notifications(&result.items, Some(pagination)))
        }
        NotificationsCommand::Read { id } => {
            cancellable!(client.mark_notification_read(&id), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "read",
                    &id,
                    format!("Notification '{}' marked as read.", id),
                ))
            })
        }
        NotificationsCommand::ReadAll => {
            cancellable!(client.mark_all_notifications_read(), cancel)?;
            output.emit(|f| {
                f.format_action(&ActionOutput::ok(
                    "read-all",
                    "notifications",
                    "All notifications marked as read.",
                ))
            })
        }
    }
}
