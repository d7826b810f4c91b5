//! Deployment models.
//!
//! A deployment is one provisioned instance of a plugin. Its status is owned
//! by the backend and only ever observed here.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle status reported by the backend.
///
/// Unknown strings are preserved in [`DeploymentStatus::Other`] so a newer
/// backend never breaks parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentStatus {
    Provisioning,
    Active,
    Failed,
    Deleting,
    Deleted,
    Other(String),
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Provisioning => "provisioning",
            Self::Active => "active",
            Self::Failed => "failed",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
            Self::Other(s) => s,
        }
    }

    /// Polling continues only while this is true.
    pub fn is_provisioning(&self) -> bool {
        matches!(self, Self::Provisioning)
    }

    /// Whether the retry action makes sense from this status.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<String> for DeploymentStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "provisioning" => Self::Provisioning,
            "active" => Self::Active,
            "failed" => Self::Failed,
            "deleting" => Self::Deleting,
            "deleted" => Self::Deleted,
            _ => Self::Other(s),
        }
    }
}

impl From<DeploymentStatus> for String {
    fn from(status: DeploymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: DeploymentStatus,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_id_from_string_or_number"
    )]
    pub plugin_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub inputs: Map<String, Value>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub outputs: Map<String, Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Deployment {
    /// Local stand-in when only the id and an assumed status are known.
    pub fn stub(id: impl Into<String>, status: DeploymentStatus) -> Self {
        Self {
            id: id.into(),
            name: None,
            status,
            plugin_id: None,
            version: None,
            inputs: Map::new(),
            outputs: Map::new(),
            error_message: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Name if set, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Body of a provisioning request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDeploymentParams {
    pub plugin_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub inputs: Map<String, Value>,
}

/// Filters for listing deployments.
#[derive(Debug, Clone, Default)]
pub struct DeploymentFilter {
    pub status: Option<String>,
    pub plugin_id: Option<String>,
}
