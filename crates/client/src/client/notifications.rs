//! Notification client methods.

use crate::client::ProvisioningClient;
use crate::endpoints::ApiRequest;
use crate::endpoints::paths::action_path;
use crate::error::Result;
use crate::models::{ListQuery, Notification, Page};

const NOTIFICATIONS_PATH: &str = "/api/v1/notifications";
const READ_ALL_PATH: &str = "/api/v1/notifications/read-all";

impl ProvisioningClient {
    pub async fn list_notifications(
        &self,
        query: &ListQuery,
        unread_only: bool,
    ) -> Result<Page<Notification>> {
        let query = if unread_only {
            query.clone().filter("unread", "true")
        } else {
            query.clone()
        };
        self.crud::<Notification>(NOTIFICATIONS_PATH)
            .list(&query)
            .await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<()> {
        self.send(ApiRequest::post(action_path(NOTIFICATIONS_PATH, id, "read")))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        self.send(ApiRequest::post(READ_ALL_PATH)).await
    }
}
