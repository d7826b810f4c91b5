//! Group models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::ids_from_strings_or_numbers"
    )]
    pub role_ids: Vec<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::ids_from_strings_or_numbers"
    )]
    pub member_ids: Vec<String>,
}

/// Body for creating or updating a group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<String>,
}
