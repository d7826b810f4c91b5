//! `ResourceDisplay` implementations for list output.

use provisio_client::{
    AccessRequest, AuditLog, BusinessUnit, Deployment, Group, Notification, Permission, Plugin,
    Role, User,
};

use crate::formatters::ResourceDisplay;
use crate::formatters::common::{format_json_value, format_missing};

impl ResourceDisplay for Deployment {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATUS", "PLUGIN", "VERSION", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format_missing(self.name.as_deref()).to_string(),
            self.status.to_string(),
            format_missing(self.plugin_id.as_deref()).to_string(),
            format_missing(self.version.as_deref()).to_string(),
            format_missing(self.created_at.as_deref()).to_string(),
        ]
    }
}

impl ResourceDisplay for &Plugin {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "TYPE", "VERSION", "ACCESS"]
    }

    fn row(&self) -> Vec<String> {
        let access = match (self.is_locked, self.has_access) {
            (false, _) => "open",
            (true, true) => "granted",
            (true, false) => "locked",
        };
        vec![
            self.id.clone(),
            self.name.clone(),
            self.deployment_type
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            format_missing(self.version.as_deref()).to_string(),
            access.to_string(),
        ]
    }
}

impl ResourceDisplay for AccessRequest {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "PLUGIN", "USER", "STATUS", "NOTE", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.plugin_name
                .clone()
                .unwrap_or_else(|| self.plugin_id.clone()),
            format_missing(self.user.as_deref()).to_string(),
            self.status.as_str().to_string(),
            format_missing(self.note.as_deref()).to_string(),
            format_missing(self.created_at.as_deref()).to_string(),
        ]
    }
}

impl ResourceDisplay for Role {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "PERMISSIONS", "SYSTEM", "DESCRIPTION"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.permissions.len().to_string(),
            if self.is_system { "yes" } else { "no" }.to_string(),
            format_missing(self.description.as_deref()).to_string(),
        ]
    }
}

impl ResourceDisplay for Permission {
    fn headers() -> Vec<&'static str> {
        vec!["CATEGORY", "SLUG", "NAME"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.category_or_prefix().to_string(),
            self.slug.clone(),
            format_missing(self.name.as_deref()).to_string(),
        ]
    }
}

impl ResourceDisplay for Group {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "ROLES", "MEMBERS", "DESCRIPTION"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.role_ids.len().to_string(),
            self.member_ids.len().to_string(),
            format_missing(self.description.as_deref()).to_string(),
        ]
    }
}

impl ResourceDisplay for User {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "EMAIL", "NAME", "ACTIVE", "ROLES"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.email.clone(),
            self.display_name().to_string(),
            if self.is_active { "yes" } else { "no" }.to_string(),
            if self.roles.is_empty() {
                "N/A".to_string()
            } else {
                self.roles.join(",")
            },
        ]
    }
}

impl ResourceDisplay for AuditLog {
    fn headers() -> Vec<&'static str> {
        vec!["TIME", "USER", "ACTION", "RESOURCE", "DETAILS"]
    }

    fn row(&self) -> Vec<String> {
        let resource = match (&self.resource_type, &self.resource_id) {
            (Some(t), Some(id)) => format!("{}/{}", t, id),
            (Some(t), None) => t.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => "N/A".to_string(),
        };
        vec![
            format_missing(self.created_at.as_deref()).to_string(),
            format_missing(self.user.as_deref()).to_string(),
            self.action.clone(),
            resource,
            self.details
                .as_ref()
                .map(format_json_value)
                .unwrap_or_default(),
        ]
    }
}

impl ResourceDisplay for BusinessUnit {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "DESCRIPTION"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format_missing(self.description.as_deref()).to_string(),
        ]
    }
}

impl ResourceDisplay for Notification {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "READ", "LEVEL", "MESSAGE", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        let message = match &self.title {
            Some(title) if !title.is_empty() => format!("{}: {}", title, self.message),
            _ => self.message.clone(),
        };
        vec![
            self.id.clone(),
            if self.read { "yes" } else { "no" }.to_string(),
            format_missing(self.level.as_deref()).to_string(),
            message,
            format_missing(self.created_at.as_deref()).to_string(),
        ]
    }
}
