//! Audit log command.
//!
//! Responsibilities:
//! - Page through the audit log with server-side filters.
//! - Validate date filters before sending them.
//!
//! Invariants:
//! - Dates go to the backend as `YYYY-MM-DD`; full RFC 3339 timestamps are
//!   accepted and reduced to their date.
//! - `--start-date` after `--end-date` is rejected locally.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use clap::Subcommand;
use tracing::debug;

use provisio_client::views::audit::AuditLogView;
use provisio_client::{AuditLogFilter, ClientError};
use provisio_config::Config;
use provisio_config::constants::DEFAULT_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::Pagination;

#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List audit log entries
    List {
        /// Only entries for this action (e.g., deployment.create)
        #[arg(long)]
        action: Option<String>,
        /// Only entries for this resource type (e.g., plugin)
        #[arg(long)]
        resource_type: Option<String>,
        /// Only entries by this user
        #[arg(long)]
        user: Option<String>,
        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        /// Fetch every page from `--page` on
        #[arg(long)]
        all: bool,
    },
}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp; return the date part.
fn parse_date(flag: &str, raw: &str) -> Result<NaiveDate, ClientError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            ClientError::Validation(format!(
                "Invalid {} '{}': expected YYYY-MM-DD",
                flag, raw
            ))
        })
}

fn build_filter(
    action: Option<String>,
    resource_type: Option<String>,
    user: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<AuditLogFilter, ClientError> {
    let start = start_date
        .as_deref()
        .map(|d| parse_date("--start-date", d))
        .transpose()?;
    let end = end_date
        .as_deref()
        .map(|d| parse_date("--end-date", d))
        .transpose()?;
    if let (Some(s), Some(e)) = (start, end)
        && s > e
    {
        return Err(ClientError::Validation(format!(
            "--start-date {} is after --end-date {}",
            s, e
        )));
    }

    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    Ok(AuditLogFilter {
        action: non_empty(action),
        resource_type: non_empty(resource_type),
        user: non_empty(user),
        start_date: start.map(|d| d.format("%Y-%m-%d").to_string()),
        end_date: end.map(|d| d.format("%Y-%m-%d").to_string()),
    })
}

pub async fn run(
    config: Config,
    command: AuditCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let AuditCommand::List {
        action,
        resource_type,
        user,
        start_date,
        end_date,
        page,
        page_size,
        all,
    } = command;

    let filter = build_filter(action, resource_type, user, start_date, end_date)?;
    let client = build_client(&config)?;

    let mut view = AuditLogView::new(page_size);
    view.set_filter(filter);
    view.go_to_page(page);

    let query = view.query();
    let first = cancellable!(client.list_audit_logs(&query, view.filter()), cancel)?;
    view.apply(first);
    let start_page = view.page();
    let mut entries = view.entries().to_vec();

    if all {
        while view.next_page() {
            debug!(page = view.page(), "Fetching next audit page");
            let query = view.query();
            let next = cancellable!(client.list_audit_logs(&query, view.filter()), cancel)?;
            view.apply(next);
            entries.extend_from_slice(view.entries());
        }
    }

    let pagination = Pagination {
        page: start_page,
        page_size: view.page_size(),
        total: view.total(),
    };
    output.emit(|f| f.format_audit_logs(&entries, Some(pagination)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_normalized() {
        let filter = build_filter(
            Some("deployment.create".to_string()),
            None,
            Some("  ".to_string()),
            Some("2024-05-01".to_string()),
            Some("2024-05-31T23:59:59Z".to_string()),
        )
        .unwrap();
        assert_eq!(filter.start_date.as_deref(), Some("2024-05-01"));
        assert_eq!(filter.end_date.as_deref(), Some("2024-05-31"));
        assert!(filter.user.is_none());
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = build_filter(None, None, None, Some("05/01/2024".to_string()), None)
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(err.to_string().contains("--start-date"));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = build_filter(
            None,
            None,
            None,
            Some("2024-06-01".to_string()),
            Some("2024-05-01".to_string()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("is after"));
    }
}
