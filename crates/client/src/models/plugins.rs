//! Plugin catalog models.
//!
//! A plugin is a backend-registered infrastructure template or microservice
//! definition. Locking and access are authorization flags owned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of workload a plugin provisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentType {
    Infrastructure,
    Microservice,
    Other(String),
}

impl DeploymentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Infrastructure => "infrastructure",
            Self::Microservice => "microservice",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for DeploymentType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "infrastructure" | "infra" => Self::Infrastructure,
            "microservice" | "service" => Self::Microservice,
            _ => Self::Other(s),
        }
    }
}

impl From<DeploymentType> for String {
    fn from(t: DeploymentType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input a plugin declares for provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInput {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    /// Allowed values, when the input is an enumeration.
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub options: Vec<Value>,
}

/// Plugin as listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default = "default_true")]
    pub has_access: bool,
    #[serde(default)]
    pub deployment_type: Option<DeploymentType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub inputs: Vec<PluginInput>,
}

fn default_true() -> bool {
    true
}

impl Plugin {
    /// A locked plugin may only be provisioned by users granted access.
    pub fn can_provision(&self) -> bool {
        !self.is_locked || self.has_access
    }
}

/// Review state of an access request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessRequestStatus {
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl AccessRequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AccessRequestStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" | "denied" => Self::Rejected,
            _ => Self::Other(s),
        }
    }
}

impl From<AccessRequestStatus> for String {
    fn from(s: AccessRequestStatus) -> Self {
        s.as_str().to_string()
    }
}

/// A user's request to deploy a locked plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub plugin_id: String,
    #[serde(default)]
    pub plugin_name: Option<String>,
    #[serde(default, alias = "user_email")]
    pub user: Option<String>,
    pub status: AccessRequestStatus,
    #[serde(default, alias = "reason")]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// File accepted by the plugin upload endpoint.
#[derive(Debug, Clone)]
pub struct PluginPackage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_defaults() {
        let p: Plugin = serde_json::from_str(r#"{"id": 1, "name": "Postgres"}"#).unwrap();
        assert_eq!(p.id, "1");
        assert!(!p.is_locked);
        assert!(p.has_access);
        assert!(p.can_provision());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn test_locked_without_access_cannot_provision() {
        let p: Plugin = serde_json::from_value(serde_json::json!({
            "id": "pg",
            "name": "Postgres",
            "is_locked": true,
            "has_access": false,
            "deployment_type": "Infrastructure"
        }))
        .unwrap();
        assert!(!p.can_provision());
        assert_eq!(p.deployment_type, Some(DeploymentType::Infrastructure));
    }

    #[test]
    fn test_plugin_inputs_parse() {
        let p: Plugin = serde_json::from_value(serde_json::json!({
            "id": "redis",
            "name": "Redis",
            "inputs": [
                {"name": "size", "type": "string", "required": true, "options": ["small", "large"]},
                {"name": "replicas", "type": "integer", "default": 1}
            ]
        }))
        .unwrap();
        assert_eq!(p.inputs.len(), 2);
        assert!(p.inputs[0].required);
        assert_eq!(p.inputs[0].options.len(), 2);
        assert_eq!(p.inputs[1].default, Some(serde_json::json!(1)));
    }

    #[test]
    fn test_access_request_status_aliases() {
        let r: AccessRequest = serde_json::from_value(serde_json::json!({
            "id": 5, "plugin_id": 9, "status": "denied", "reason": "not needed"
        }))
        .unwrap();
        assert_eq!(r.status, AccessRequestStatus::Rejected);
        assert_eq!(r.note.as_deref(), Some("not needed"));
    }
}
