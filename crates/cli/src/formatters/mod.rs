//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide the JSON and table output formats.
//! - Implement the `Formatter` trait for every provisioning resource.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings; see `output_result`).
//!
//! Invariants:
//! - JSON output is always valid JSON, `[]` for an empty list.
//! - Table output prints `No <things> found.` for an empty list.
//! - Missing values render as `N/A` in tables and `null` in JSON.

use anyhow::Result;
use serde::Serialize;

use provisio_client::{
    AccessRequest, AuditLog, BusinessUnit, CostSummary, CurrentUser, Deployment, DeploymentCost,
    Group, Notification, Permission, Plugin, Role, User,
};
use provisio_config::{BusinessUnitRef, Config};

mod common;
mod json;
mod resource_impls;
mod table;

pub use common::output_result;
pub use json::JsonFormatter;
pub use table::{Pagination, TableFormatter};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// Who is signed in and which business unit scopes their requests.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub user: CurrentUser,
    pub business_unit: Option<BusinessUnitRef>,
}

/// Result of an action endpoint that has no resource to show.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutput {
    pub action: String,
    pub target: String,
    pub success: bool,
    pub message: String,
}

impl ActionOutput {
    pub fn ok(action: &str, target: &str, message: impl Into<String>) -> Self {
        Self {
            action: action.to_string(),
            target: target.to_string(),
            success: true,
            message: message.into(),
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_deployments(
        &self,
        deployments: &[Deployment],
        pagination: Option<Pagination>,
    ) -> Result<String>;

    fn format_deployment(&self, deployment: &Deployment) -> Result<String>;

    fn format_plugins(&self, plugins: &[&Plugin]) -> Result<String>;

    fn format_plugin(&self, plugin: &Plugin) -> Result<String>;

    fn format_access_requests(
        &self,
        requests: &[AccessRequest],
        pagination: Option<Pagination>,
    ) -> Result<String>;

    fn format_roles(&self, roles: &[Role], pagination: Option<Pagination>) -> Result<String>;

    fn format_role(&self, role: &Role) -> Result<String>;

    fn format_permissions(&self, permissions: &[Permission]) -> Result<String>;

    fn format_groups(&self, groups: &[Group], pagination: Option<Pagination>) -> Result<String>;

    fn format_group(&self, group: &Group) -> Result<String>;

    fn format_users(&self, users: &[User], pagination: Option<Pagination>) -> Result<String>;

    fn format_user(&self, user: &User) -> Result<String>;

    fn format_audit_logs(
        &self,
        entries: &[AuditLog],
        pagination: Option<Pagination>,
    ) -> Result<String>;

    /// `active` marks the business unit currently scoping requests.
    fn format_business_units(
        &self,
        units: &[BusinessUnit],
        active: Option<&BusinessUnitRef>,
        pagination: Option<Pagination>,
    ) -> Result<String>;

    fn format_business_unit(&self, unit: &BusinessUnit) -> Result<String>;

    fn format_cost_summary(&self, summary: &CostSummary) -> Result<String>;

    fn format_deployment_cost(&self, cost: &DeploymentCost) -> Result<String>;

    fn format_notifications(
        &self,
        notifications: &[Notification],
        pagination: Option<Pagination>,
    ) -> Result<String>;

    fn format_session(&self, status: &SessionStatus) -> Result<String>;

    fn format_action(&self, output: &ActionOutput) -> Result<String>;

    fn format_config(&self, config: &Config) -> Result<String>;
}

/// Column schema shared by table output for list commands.
pub trait ResourceDisplay {
    /// UPPERCASE column headers.
    fn headers() -> Vec<&'static str>;

    /// One table row; cells line up with `headers()`.
    fn row(&self) -> Vec<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        let err = OutputFormat::from_str("xml").unwrap_err();
        assert!(err.to_string().contains("Valid options: json, table"));
    }
}
