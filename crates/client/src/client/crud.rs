//! Generic CRUD binding for simple collection resources.
//!
//! A [`Crud`] is bound to one collection path and yields the five standard
//! operations. Resources with extra routes build on top of it.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::ProvisioningClient;
use crate::endpoints::ApiRequest;
use crate::endpoints::paths::item_path;
use crate::error::Result;
use crate::models::{ListQuery, Page};

/// CRUD operations on `collection`, decoding items as `T`.
pub struct Crud<'a, T> {
    client: &'a ProvisioningClient,
    collection: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Crud<'a, T> {
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// `GET {collection}` with paging, search and filters.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>> {
        let request = ApiRequest::get(self.collection).query_pairs(query.to_pairs());
        Ok(self
            .client
            .fetch_optional(request)
            .await?
            .unwrap_or_else(Page::empty))
    }

    /// `GET {collection}/{id}`.
    pub async fn get(&self, id: &str) -> Result<T> {
        self.client
            .fetch(ApiRequest::get(item_path(self.collection, id)))
            .await
    }

    /// `POST {collection}`.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T> {
        self.client
            .fetch(ApiRequest::post(self.collection).json(body)?)
            .await
    }

    /// `PUT {collection}/{id}`.
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<T> {
        self.client
            .fetch(ApiRequest::put(item_path(self.collection, id)).json(body)?)
            .await
    }

    /// `DELETE {collection}/{id}`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send(ApiRequest::delete(item_path(self.collection, id)))
            .await
    }
}

impl ProvisioningClient {
    /// Bind the CRUD operations to `collection`.
    pub fn crud<T: DeserializeOwned>(&self, collection: &'static str) -> Crud<'_, T> {
        Crud {
            client: self,
            collection,
            _item: PhantomData,
        }
    }
}
