//! Cost reporting client methods. Read-only.

use crate::client::ProvisioningClient;
use crate::endpoints::ApiRequest;
use crate::endpoints::paths::item_path;
use crate::error::Result;
use crate::models::{CostSummary, DeploymentCost};

const COST_SUMMARY_PATH: &str = "/api/v1/cost/summary";
const COST_DEPLOYMENTS_PATH: &str = "/api/v1/cost/deployments";

impl ProvisioningClient {
    /// Aggregated cost, optionally restricted to a period such as `2024-05`.
    pub async fn cost_summary(&self, period: Option<&str>) -> Result<CostSummary> {
        let mut request = ApiRequest::get(COST_SUMMARY_PATH);
        if let Some(period) = period {
            request = request.query("period", period);
        }
        self.fetch(request).await
    }

    pub async fn deployment_cost(&self, deployment_id: &str) -> Result<DeploymentCost> {
        self.fetch(ApiRequest::get(item_path(COST_DEPLOYMENTS_PATH, deployment_id)))
            .await
    }
}
