//! Role and permission models.

use serde::{Deserialize, Serialize};

/// Role with its granted permission slugs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub permissions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_id_from_string_or_number"
    )]
    pub business_unit_id: Option<String>,
    #[serde(default)]
    pub is_system: bool,
}

/// Entry of the known permission catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(alias = "name_slug", alias = "code")]
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Permission {
    /// Category used for grouping, derived from the slug when not sent.
    ///
    /// `deployments:create` and `deployments.create` both fall under
    /// `deployments`.
    pub fn category_or_prefix(&self) -> &str {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            return category;
        }
        self.slug
            .split([':', '.'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("general")
    }
}

/// Body for creating or updating a role.
///
/// Build it through [`crate::client::ProvisioningClient::create_role`] so the
/// permission slugs are normalised first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_numeric_ids() {
        let role: Role = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Operator",
            "permissions": ["deployments:read"],
            "business_unit_id": null
        }))
        .unwrap();
        assert_eq!(role.id, "3");
        assert_eq!(role.permissions, vec!["deployments:read"]);
        assert!(role.business_unit_id.is_none());
    }

    #[test]
    fn test_permission_category_fallback() {
        let p = Permission {
            slug: "plugins:lock".to_string(),
            name: None,
            description: None,
            category: None,
        };
        assert_eq!(p.category_or_prefix(), "plugins");

        let p = Permission {
            slug: "audit.read".to_string(),
            name: None,
            description: None,
            category: Some("Audit".to_string()),
        };
        assert_eq!(p.category_or_prefix(), "Audit");
    }

    #[test]
    fn test_role_params_omits_empty_description() {
        let params = RoleParams {
            name: "Viewer".to_string(),
            description: None,
            permissions: vec!["deployments:read".to_string()],
        };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("description").is_none());
    }
}
