//! Audit log models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ListQuery;

/// One recorded action. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_id_from_string_or_number"
    )]
    pub resource_id: Option<String>,
    #[serde(default, alias = "user_email", alias = "username")]
    pub user: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<String>,
}

/// Server-side filters for the audit log listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub user: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl AuditLogFilter {
    /// Append the set filters to a list query.
    pub fn apply(&self, query: ListQuery) -> ListQuery {
        query
            .filter_opt("action", self.action.clone())
            .filter_opt("resource_type", self.resource_type.clone())
            .filter_opt("user", self.user.clone())
            .filter_opt("start_date", self.start_date.clone())
            .filter_opt("end_date", self.end_date.clone())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
