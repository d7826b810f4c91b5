//! Group client methods.

use crate::client::ProvisioningClient;
use crate::endpoints::ApiRequest;
use crate::endpoints::paths::{action_path, encode_segment};
use crate::error::Result;
use crate::models::{Group, GroupParams, ListQuery, Page};

const GROUPS_PATH: &str = "/api/v1/groups";

fn member_path(group_id: &str, user_id: &str) -> String {
    format!(
        "{}/{}",
        action_path(GROUPS_PATH, group_id, "members"),
        encode_segment(user_id)
    )
}

impl ProvisioningClient {
    pub async fn list_groups(&self, query: &ListQuery) -> Result<Page<Group>> {
        self.crud::<Group>(GROUPS_PATH).list(query).await
    }

    pub async fn get_group(&self, id: &str) -> Result<Group> {
        self.crud::<Group>(GROUPS_PATH).get(id).await
    }

    pub async fn create_group(&self, params: &GroupParams) -> Result<Group> {
        self.crud::<Group>(GROUPS_PATH).create(params).await
    }

    pub async fn update_group(&self, id: &str, params: &GroupParams) -> Result<Group> {
        self.crud::<Group>(GROUPS_PATH).update(id, params).await
    }

    pub async fn delete_group(&self, id: &str) -> Result<()> {
        self.crud::<Group>(GROUPS_PATH).delete(id).await
    }

    pub async fn add_group_member(&self, group_id: &str, user_id: &str) -> Result<()> {
        self.send(ApiRequest::post(member_path(group_id, user_id)))
            .await
    }

    pub async fn remove_group_member(&self, group_id: &str, user_id: &str) -> Result<()> {
        self.send(ApiRequest::delete(member_path(group_id, user_id)))
            .await
    }
}
