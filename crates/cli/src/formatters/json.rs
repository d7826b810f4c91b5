//! JSON formatter implementation.
//!
//! Every resource prints as pretty JSON. Pagination metadata is not
//! included; list commands print the items array.

use anyhow::Result;
use serde::Serialize;

use provisio_client::{
    AccessRequest, AuditLog, BusinessUnit, CostSummary, Deployment, DeploymentCost, Group,
    Notification, Permission, Plugin, Role, User,
};
use provisio_config::{BusinessUnitRef, Config};

use crate::formatters::{ActionOutput, Formatter, Pagination, SessionStatus};

/// JSON formatter.
pub struct JsonFormatter;

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

impl Formatter for JsonFormatter {
    fn format_deployments(&self, deployments: &[Deployment], _: Option<Pagination>) -> Result<String> {
        pretty(deployments)
    }

    fn format_deployment(&self, deployment: &Deployment) -> Result<String> {
        pretty(deployment)
    }

    fn format_plugins(&self, plugins: &[&Plugin]) -> Result<String> {
        pretty(plugins)
    }

    fn format_plugin(&self, plugin: &Plugin) -> Result<String> {
        pretty(plugin)
    }

    fn format_access_requests(
        &self,
        requests: &[AccessRequest],
        _: Option<Pagination>,
    ) -> Result<String> {
        pretty(requests)
    }

    fn format_roles(&self, roles: &[Role], _: Option<Pagination>) -> Result<String> {
        pretty(roles)
    }

    fn format_role(&self, role: &Role) -> Result<String> {
        pretty(role)
    }

    fn format_permissions(&self, permissions: &[Permission]) -> Result<String> {
        pretty(permissions)
    }

    fn format_groups(&self, groups: &[Group], _: Option<Pagination>) -> Result<String> {
        pretty(groups)
    }

    fn format_group(&self, group: &Group) -> Result<String> {
        pretty(group)
    }

    fn format_users(&self, users: &[User], _: Option<Pagination>) -> Result<String> {
        pretty(users)
    }

    fn format_user(&self, user: &User) -> Result<String> {
        pretty(user)
    }

    fn format_audit_logs(&self, entries: &[AuditLog], _: Option<Pagination>) -> Result<String> {
        pretty(entries)
    }

    fn format_business_units(
        &self,
        units: &[BusinessUnit],
        _active: Option<&BusinessUnitRef>,
        _: Option<Pagination>,
    ) -> Result<String> {
        pretty(units)
    }

    fn format_business_unit(&self, unit: &BusinessUnit) -> Result<String> {
        pretty(unit)
    }

    fn format_cost_summary(&self, summary: &CostSummary) -> Result<String> {
        pretty(summary)
    }

    fn format_deployment_cost(&self, cost: &DeploymentCost) -> Result<String> {
        pretty(cost)
    }

    fn format_notifications(
        &self,
        notifications: &[Notification],
        _: Option<Pagination>,
    ) -> Result<String> {
        pretty(notifications)
    }

    fn format_session(&self, status: &SessionStatus) -> Result<String> {
        pretty(status)
    }

    fn format_action(&self, output: &ActionOutput) -> Result<String> {
        pretty(output)
    }

    fn format_config(&self, config: &Config) -> Result<String> {
        pretty(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provisio_client::DeploymentStatus;

    #[test]
    fn test_empty_list_is_valid_json() {
        let out = JsonFormatter.format_deployments(&[], None).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_deployment_status_serializes_lowercase() {
        let d = Deployment::stub("7", DeploymentStatus::Provisioning);
        let out = JsonFormatter.format_deployment(&d).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "provisioning");
        assert_eq!(value["id"], "7");
    }
}
