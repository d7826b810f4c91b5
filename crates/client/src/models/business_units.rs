//! Business unit (tenant) models.

use provisio_config::BusinessUnitRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessUnit {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BusinessUnit {
    /// Reference stored in the session when this unit becomes active.
    pub fn to_ref(&self) -> BusinessUnitRef {
        BusinessUnitRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BusinessUnitParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
