//! User client methods.

use crate::client::ProvisioningClient;
use crate::error::Result;
use crate::models::{ListQuery, Page, User, UserParams};

const USERS_PATH: &str = "/api/v1/users";

impl ProvisioningClient {
    pub async fn list_users(&self, query: &ListQuery) -> Result<Page<User>> {
        self.crud::<User>(USERS_PATH).list(query).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.crud::<User>(USERS_PATH).get(id).await
    }

    pub async fn create_user(&self, params: &UserParams) -> Result<User> {
        self.crud::<User>(USERS_PATH).create(params).await
    }

    pub async fn update_user(&self, id: &str, params: &UserParams) -> Result<User> {
        self.crud::<User>(USERS_PATH).update(id, params).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.crud::<User>(USERS_PATH).delete(id).await
    }
}
