//! Table formatter implementation.
//!
//! Responsibilities:
//! - Render lists as aligned columns under an `====` rule.
//! - Render single resources as `Field: value` blocks.
//! - Append a pagination footer to paged lists.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.

use anyhow::Result;

use provisio_client::{
    AccessRequest, AuditLog, BusinessUnit, CostItem, CostSummary, Deployment, DeploymentCost,
    Group, Notification, Page, Permission, Plugin, Role, User,
};
use provisio_config::{BusinessUnitRef, Config};

use crate::formatters::common::{format_json_value, format_missing};
use crate::formatters::{ActionOutput, Formatter, ResourceDisplay, SessionStatus};

/// Pagination metadata for table output. `page` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }

    fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.page_size)).max(1)
    }

    /// `Showing a-b of total (page x of y)`, or `None` when nothing is shown.
    pub fn footer(&self, shown: usize) -> Option<String> {
        if shown == 0 {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size) + 1;
        let end = start + shown as u64 - 1;
        Some(format!(
            "Showing {}-{} of {} (page {} of {})",
            start,
            end,
            self.total,
            self.page,
            self.total_pages()
        ))
    }
}

/// Table formatter.
pub struct TableFormatter;

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();
    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                format!("{:<width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    output.push_str(&line(headers.iter().map(|h| h.to_string()).collect()));
    output.push('\n');
    output.push_str(&line(widths.iter().map(|w| "=".repeat(*w)).collect()));
    output.push('\n');
    for row in rows {
        output.push_str(&line(row.clone()));
        output.push('\n');
    }
    output
}

fn render_list<T: ResourceDisplay>(
    items: &[T],
    noun: &str,
    pagination: Option<Pagination>,
) -> String {
    if items.is_empty() {
        return format!("No {} found.\n", noun);
    }
    let rows: Vec<Vec<String>> = items.iter().map(ResourceDisplay::row).collect();
    let mut output = render_table(&T::headers(), &rows);
    if let Some(footer) = pagination.and_then(|p| p.footer(items.len())) {
        output.push('\n');
        output.push_str(&footer);
        output.push('\n');
    }
    output
}

fn render_fields(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
    fields
        .iter()
        .map(|(k, v)| format!("{:<width$} {}\n", format!("{}:", k), v, width = width))
        .collect()
}

fn render_map(title: &str, map: &serde_json::Map<String, serde_json::Value>) -> String {
    if map.is_empty() {
        return String::new();
    }
    let mut output = format!("\n{}:\n", title);
    for (key, value) in map {
        output.push_str(&format!("  {} = {}\n", key, format_json_value(value)));
    }
    output
}

fn render_cost_items(title: &str, items: &[CostItem], currency: &str) -> String {
    if items.is_empty() {
        return String::new();
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|i| vec![i.key.clone(), format!("{:.2} {}", i.amount, currency)])
        .collect();
    format!("\n{}:\n{}", title, render_table(&["NAME", "AMOUNT"], &rows))
}

impl Formatter for TableFormatter {
    fn format_deployments(
        &self,
        deployments: &[Deployment],
        pagination: Option<Pagination>,
    ) -> Result<String> {
        Ok(render_list(deployments, "deployments", pagination))
    }

    fn format_deployment(&self, d: &Deployment) -> Result<String> {
        let mut fields = vec![
            ("ID", d.id.clone()),
            ("Name", format_missing(d.name.as_deref()).to_string()),
            ("Status", d.status.to_string()),
            ("Plugin", format_missing(d.plugin_id.as_deref()).to_string()),
            ("Version", format_missing(d.version.as_deref()).to_string()),
            ("Created", format_missing(d.created_at.as_deref()).to_string()),
            ("Updated", format_missing(d.updated_at.as_deref()).to_string()),
        ];
        if let Some(err) = &d.error_message {
            fields.push(("Error", err.clone()));
        }
        let mut output = render_fields(&fields);
        output.push_str(&render_map("Inputs", &d.inputs));
        output.push_str(&render_map("Outputs", &d.outputs));
        Ok(output)
    }

    fn format_plugins(&self, plugins: &[&Plugin]) -> Result<String> {
        Ok(render_list(plugins, "plugins", None))
    }

    fn format_plugin(&self, p: &Plugin) -> Result<String> {
        let mut output = render_fields(&[
            ("ID", p.id.clone()),
            ("Name", p.name.clone()),
            ("Version", format_missing(p.version.as_deref()).to_string()),
            (
                "Type",
                p.deployment_type
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            ("Locked", p.is_locked.to_string()),
            ("Has access", p.has_access.to_string()),
            ("Description", format_missing(p.description.as_deref()).to_string()),
        ]);
        if !p.inputs.is_empty() {
            let rows: Vec<Vec<String>> = p
                .inputs
                .iter()
                .map(|i| {
                    vec![
                        i.name.clone(),
                        format_missing(i.input_type.as_deref()).to_string(),
                        if i.required { "yes" } else { "no" }.to_string(),
                        i.default.as_ref().map(format_json_value).unwrap_or_default(),
                    ]
                })
                .collect();
            output.push_str("\nInputs:\n");
            output.push_str(&render_table(&["NAME", "TYPE", "REQUIRED", "DEFAULT"], &rows));
        }
        Ok(output)
    }

    fn format_access_requests(
        &self,
        requests: &[AccessRequest],
        pagination: Option<Pagination>,
    ) -> Result<String> {
        Ok(render_list(requests, "access requests", pagination))
    }

    fn format_roles(&self, roles: &[Role], pagination: Option<Pagination>) -> Result<String> {
        Ok(render_list(roles, "roles", pagination))
    }

    fn format_role(&self, role: &Role) -> Result<String> {
        let mut output = render_fields(&[
            ("ID", role.id.clone()),
            ("Name", role.name.clone()),
            ("Description", format_missing(role.description.as_deref()).to_string()),
            ("System", role.is_system.to_string()),
        ]);
        output.push_str("\nPermissions:\n");
        if role.permissions.is_empty() {
            output.push_str("  (none)\n");
        }
        for slug in &role.permissions {
            output.push_str(&format!("  {}\n", slug));
        }
        Ok(output)
    }

    fn format_permissions(&self, permissions: &[Permission]) -> Result<String> {
        Ok(render_list(permissions, "permissions", None))
    }

    fn format_groups(&self, groups: &[Group], pagination: Option<Pagination>) -> Result<String> {
        Ok(render_list(groups, "groups", pagination))
    }

    fn format_group(&self, group: &Group) -> Result<String> {
        let list = |ids: &[String]| {
            if ids.is_empty() {
                "N/A".to_string()
            } else {
                ids.join(", ")
            }
        };
        Ok(render_fields(&[
            ("ID", group.id.clone()),
            ("Name", group.name.clone()),
            ("Description", format_missing(group.description.as_deref()).to_string()),
            ("Roles", list(&group.role_ids)),
            ("Members", list(&group.member_ids)),
        ]))
    }

    fn format_users(&self, users: &[User], pagination: Option<Pagination>) -> Result<String> {
        Ok(render_list(users, "users", pagination))
    }

    fn format_user(&self, user: &User) -> Result<String> {
        Ok(render_fields(&[
            ("ID", user.id.clone()),
            ("Email", user.email.clone()),
            ("Username", format_missing(user.username.as_deref()).to_string()),
            ("Full name", format_missing(user.full_name.as_deref()).to_string()),
            ("Active", user.is_active.to_string()),
            ("Roles", user.roles.join(", ")),
        ]))
    }

    fn format_audit_logs(
        &self,
        entries: &[AuditLog],
        pagination: Option<Pagination>,
    ) -> Result<String> {
        Ok(render_list(entries, "audit log entries", pagination))
    }

    fn format_business_units(
        &self,
        units: &[BusinessUnit],
        active: Option<&BusinessUnitRef>,
        pagination: Option<Pagination>,
    ) -> Result<String> {
        if units.is_empty() {
            return Ok("No business units found.\n".to_string());
        }
        let mut headers = vec!["ACTIVE"];
        headers.extend(BusinessUnit::headers());
        let rows: Vec<Vec<String>> = units
            .iter()
            .map(|u| {
                let marker = if active.is_some_and(|a| a.id == u.id) { "*" } else { "" };
                let mut row = vec![marker.to_string()];
                row.extend(u.row());
                row
            })
            .collect();
        let mut output = render_table(&headers, &rows);
        if let Some(footer) = pagination.and_then(|p| p.footer(units.len())) {
            output.push('\n');
            output.push_str(&footer);
            output.push('\n');
        }
        Ok(output)
    }

    fn format_business_unit(&self, unit: &BusinessUnit) -> Result<String> {
        Ok(render_fields(&[
            ("ID", unit.id.to_string()),
            ("Name", unit.name.clone()),
            ("Description", format_missing(unit.description.as_deref()).to_string()),
            ("Created", format_missing(unit.created_at.as_deref()).to_string()),
        ]))
    }

    fn format_cost_summary(&self, s: &CostSummary) -> Result<String> {
        let mut output = render_fields(&[
            ("Period", format_missing(s.period.as_deref()).to_string()),
            ("Total", format!("{:.2} {}", s.total, s.currency)),
        ]);
        output.push_str(&render_cost_items("By plugin", &s.by_plugin, &s.currency));
        output.push_str(&render_cost_items(
            "By deployment",
            &s.by_deployment,
            &s.currency,
        ));
        Ok(output)
    }

    fn format_deployment_cost(&self, c: &DeploymentCost) -> Result<String> {
        let mut output = render_fields(&[
            ("Deployment", c.deployment_id.clone()),
            ("Period", format_missing(c.period.as_deref()).to_string()),
            ("Total", format!("{:.2} {}", c.total, c.currency)),
        ]);
        output.push_str(&render_cost_items("Items", &c.items, &c.currency));
        Ok(output)
    }

    fn format_notifications(
        &self,
        notifications: &[Notification],
        pagination: Option<Pagination>,
    ) -> Result<String> {
        Ok(render_list(notifications, "notifications", pagination))
    }

    fn format_session(&self, status: &SessionStatus) -> Result<String> {
        let user = &status.user;
        let business_unit = status
            .business_unit
            .as_ref()
            .map(|bu| format!("{} ({})", bu.name, bu.id))
            .unwrap_or_else(|| "none selected".to_string());
        Ok(render_fields(&[
            ("User", user.email.clone()),
            ("Name", format_missing(user.full_name.as_deref()).to_string()),
            ("Roles", user.roles.join(", ")),
            ("Superuser", user.is_superuser.to_string()),
            ("Business unit", business_unit),
        ]))
    }

    fn format_action(&self, output: &ActionOutput) -> Result<String> {
        Ok(format!("{}\n", output.message))
    }

    fn format_config(&self, config: &Config) -> Result<String> {
        let session = config
            .session_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(platform default)".to_string());
        Ok(render_fields(&[
            ("Base URL", config.connection.base_url.clone()),
            ("Skip verify", config.connection.skip_verify.to_string()),
            ("Timeout", format!("{}s", config.connection.timeout.as_secs())),
            ("Login route", config.connection.login_route.clone()),
            (
                "Poll interval",
                format!("{}ms", config.polling.interval.as_millis()),
            ),
            (
                "Retry watch timeout",
                format!("{}s", config.polling.retry_timeout.as_secs()),
            ),
            ("Session file", session),
        ]))
    }
}
