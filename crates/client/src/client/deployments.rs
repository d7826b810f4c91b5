//! Deployment client methods.

use crate::client::ProvisioningClient;
use crate::endpoints::ApiRequest;
use crate::endpoints::paths::{action_path, item_path};
use crate::error::Result;
use crate::models::{
    CreateDeploymentParams, Deployment, DeploymentFilter, ListQuery, Page,
};

const DEPLOYMENTS_PATH: &str = "/api/v1/deployments";

impl ProvisioningClient {
    /// List deployments visible in the active business unit.
    pub async fn list_deployments(
        &self,
        query: &ListQuery,
        filter: &DeploymentFilter,
    ) -> Result<Page<Deployment>> {
        let query = query
            .clone()
            .filter_opt("status", filter.status.clone())
            .filter_opt("plugin_id", filter.plugin_id.clone());
        self.crud::<Deployment>(DEPLOYMENTS_PATH).list(&query).await
    }

    /// Fetch one deployment, including its current status.
    pub async fn get_deployment(&self, id: &str) -> Result<Deployment> {
        self.fetch(ApiRequest::get(item_path(DEPLOYMENTS_PATH, id)))
            .await
    }

    /// Provision a new deployment of a plugin.
    pub async fn create_deployment(&self, params: &CreateDeploymentParams) -> Result<Deployment> {
        self.crud::<Deployment>(DEPLOYMENTS_PATH).create(params).await
    }

    /// Request deletion. The backend moves the deployment to `deleting`.
    pub async fn delete_deployment(&self, id: &str) -> Result<()> {
        self.crud::<Deployment>(DEPLOYMENTS_PATH).delete(id).await
    }

    /// Ask the backend to re-run provisioning of a failed deployment.
    ///
    /// Returns the updated deployment when the backend sends one back.
    pub async fn retry_deployment(&self, id: &str) -> Result<Option<Deployment>> {
        self.fetch_optional(ApiRequest::post(action_path(DEPLOYMENTS_PATH, id, "retry")))
            .await
    }
}
