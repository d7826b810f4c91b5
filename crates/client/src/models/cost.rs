//! Cost reporting models. Read-only.

use serde::{Deserialize, Serialize};

/// One line of a cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostItem {
    #[serde(alias = "name", alias = "label")]
    pub key: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::f64_from_string_or_number")]
    pub amount: f64,
}

/// Aggregated cost over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(
        default,
        alias = "total_cost",
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub by_deployment: Vec<CostItem>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub by_plugin: Vec<CostItem>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Cost of a single deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentCost {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub deployment_id: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(
        default,
        alias = "total_cost",
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub items: Vec<CostItem>,
}
