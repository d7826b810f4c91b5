//! Role and permission client methods.
//!
//! Permission slugs are normalised before every submission: business-unit
//! prefixes (`bu:{uuid}:`) are stripped, slugs are lower-cased and duplicates
//! dropped.

use crate::client::ProvisioningClient;
use crate::endpoints::ApiRequest;
use crate::error::Result;
use crate::models::{ListQuery, Page, Permission, Role, RoleParams};
use crate::permissions::normalize_permissions;

const ROLES_PATH: &str = "/api/v1/roles";
const PERMISSIONS_PATH: &str = "/api/v1/permissions";

fn normalized(params: &RoleParams) -> RoleParams {
    RoleParams {
        name: params.name.trim().to_string(),
        description: params.description.clone(),
        permissions: normalize_permissions(&params.permissions),
    }
}

impl ProvisioningClient {
    pub async fn list_roles(&self, query: &ListQuery) -> Result<Page<Role>> {
        self.crud::<Role>(ROLES_PATH).list(query).await
    }

    pub async fn get_role(&self, id: &str) -> Result<Role> {
        self.crud::<Role>(ROLES_PATH).get(id).await
    }

    pub async fn create_role(&self, params: &RoleParams) -> Result<Role> {
        self.crud::<Role>(ROLES_PATH).create(&normalized(params)).await
    }

    pub async fn update_role(&self, id: &str, params: &RoleParams) -> Result<Role> {
        self.crud::<Role>(ROLES_PATH)
            .update(id, &normalized(params))
            .await
    }

    pub async fn delete_role(&self, id: &str) -> Result<()> {
        self.crud::<Role>(ROLES_PATH).delete(id).await
    }

    /// The catalogue of known permissions.
    ///
    /// Accepts either a bare array or a paginated envelope.
    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        let page: Option<Page<Permission>> =
            self.fetch_optional(ApiRequest::get(PERMISSIONS_PATH)).await?;
        Ok(page.map(|p| p.items).unwrap_or_default())
    }
}
