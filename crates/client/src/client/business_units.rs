//! Business unit client methods.
//!
//! Selecting the active unit is local state; see `session.rs`.

use crate::client::ProvisioningClient;
use crate::error::Result;
use crate::models::{BusinessUnit, BusinessUnitParams, ListQuery, Page};

const BUSINESS_UNITS_PATH: &str = "/api/v1/business-units";

impl ProvisioningClient {
    pub async fn list_business_units(&self, query: &ListQuery) -> Result<Page<BusinessUnit>> {
        self.crud::<BusinessUnit>(BUSINESS_UNITS_PATH)
            .list(query)
            .await
    }

    pub async fn get_business_unit(&self, id: &str) -> Result<BusinessUnit> {
        self.crud::<BusinessUnit>(BUSINESS_UNITS_PATH).get(id).await
    }

    pub async fn create_business_unit(&self, params: &BusinessUnitParams) -> Result<BusinessUnit> {
        self.crud::<BusinessUnit>(BUSINESS_UNITS_PATH)
            .create(params)
            .await
    }

    pub async fn update_business_unit(
        &self,
        id: &str,
        params: &BusinessUnitParams,
    ) -> Result<BusinessUnit> {
        self.crud::<BusinessUnit>(BUSINESS_UNITS_PATH)
            .update(id, params)
            .await
    }

    /// Delete a business unit. Clears the local selection if it was active.
    pub async fn delete_business_unit(&self, id: &str) -> Result<()> {
        self.crud::<BusinessUnit>(BUSINESS_UNITS_PATH)
            .delete(id)
            .await?;
        if self
            .active_business_unit()
            .is_some_and(|active| active.id.to_string() == id)
        {
            self.clear_business_unit();
        }
        Ok(())
    }
}
