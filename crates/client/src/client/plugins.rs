//! Plugin catalog and access-request client methods.
//!
//! Responsibilities:
//! - Catalog listing and lookup.
//! - Lock/unlock (admin) and access requests for locked plugins.
//! - Package upload as multipart form data.

use serde_json::json;

use crate::client::ProvisioningClient;
use crate::endpoints::paths::action_path;
use crate::endpoints::{ApiRequest, FilePart};
use crate::error::{ClientError, Result};
use crate::models::{AccessRequest, ListQuery, Page, Plugin, PluginPackage};

const PLUGINS_PATH: &str = "/api/v1/plugins";
const ACCESS_REQUESTS_PATH: &str = "/api/v1/plugins/access-requests";
const UPLOAD_PATH: &str = "/api/v1/plugins/upload";

impl ProvisioningClient {
    pub async fn list_plugins(&self, query: &ListQuery) -> Result<Page<Plugin>> {
        self.crud::<Plugin>(PLUGINS_PATH).list(query).await
    }

    pub async fn get_plugin(&self, id: &str) -> Result<Plugin> {
        self.crud::<Plugin>(PLUGINS_PATH).get(id).await
    }

    /// Restrict a plugin to users with granted access.
    pub async fn lock_plugin(&self, id: &str) -> Result<Option<Plugin>> {
        self.fetch_optional(ApiRequest::post(action_path(PLUGINS_PATH, id, "lock")))
            .await
    }

    pub async fn unlock_plugin(&self, id: &str) -> Result<Option<Plugin>> {
        self.fetch_optional(ApiRequest::post(action_path(PLUGINS_PATH, id, "unlock")))
            .await
    }

    /// Ask an administrator for access to a locked plugin.
    pub async fn request_plugin_access(
        &self,
        id: &str,
        note: Option<&str>,
    ) -> Result<Option<AccessRequest>> {
        let body = match note {
            Some(note) => json!({ "note": note }),
            None => json!({}),
        };
        let request =
            ApiRequest::post(action_path(PLUGINS_PATH, id, "access-requests")).json(&body)?;
        self.fetch_optional(request).await
    }

    /// List access requests, optionally only those in `status`.
    pub async fn list_access_requests(
        &self,
        query: &ListQuery,
        status: Option<&str>,
    ) -> Result<Page<AccessRequest>> {
        let query = query.clone().filter_opt("status", status);
        self.crud::<AccessRequest>(ACCESS_REQUESTS_PATH)
            .list(&query)
            .await
    }

    pub async fn approve_access_request(&self, request_id: &str) -> Result<()> {
        self.send(ApiRequest::post(action_path(
            ACCESS_REQUESTS_PATH,
            request_id,
            "approve",
        )))
        .await
    }

    pub async fn reject_access_request(&self, request_id: &str, note: Option<&str>) -> Result<()> {
        let mut request =
            ApiRequest::post(action_path(ACCESS_REQUESTS_PATH, request_id, "reject"));
        if let Some(note) = note {
            request = request.json(&json!({ "note": note }))?;
        }
        self.send(request).await
    }

    /// Upload a plugin package.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty package without
    /// contacting the backend.
    pub async fn upload_plugin(&self, package: PluginPackage) -> Result<Option<Plugin>> {
        if package.bytes.is_empty() {
            return Err(ClientError::Validation(format!(
                "Plugin package '{}' is empty",
                package.file_name
            )));
        }
        let part = FilePart {
            field: "file".to_string(),
            mime: Some(mime_for(&package.file_name).to_string()),
            file_name: package.file_name,
            bytes: package.bytes,
        };
        self.fetch_optional(ApiRequest::post(UPLOAD_PATH).multipart(part))
            .await
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".zip") {
        "application/zip"
    } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
        "application/gzip"
    } else if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        "application/yaml"
    } else if lower.ends_with(".json") {
        "application/json"
    } else {
        "application/octet-stream"
    }
}
