//! Main provisioning API client and API methods.
//!
//! This module provides the primary [`ProvisioningClient`] for talking to the
//! provisioning backend. It attaches credentials and tenant scope to every
//! call and recovers from an expired access token by refreshing it once.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Token refresh, login/logout and the active business unit
//! - `crud`: Generic list/get/create/update/delete binding
//! - `deployments`, `plugins`, `roles`, `groups`, `users`, `audit`,
//!   `business_units`, `cost`, `notifications`: resource methods
//! - `watch`: Deployment status polling
//!
//! # What this module does NOT handle:
//! - Building and decoding individual HTTP exchanges (see [`crate::endpoints`])
//! - Where the token lives between runs (see [`crate::auth::SessionStore`])
//!
//! # Invariants
//! - A `401` triggers at most one refresh and exactly one retry per call
//! - The refresh endpoint itself never triggers a refresh
//! - The `refresh_call!` macro centralizes this pattern

pub mod builder;
mod crud;
mod session;

mod audit;
mod business_units;
mod cost;
mod deployments;
mod groups;
mod notifications;
mod plugins;
mod roles;
mod users;
mod watch;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use provisio_config::PollingConfig;

use crate::auth::SessionStore;
use crate::endpoints::{self, ApiRequest, AuthContext};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

pub use crud::Crud;
pub use watch::WatchOutcome;

/// Callback run when the session cannot be recovered. Receives the login
/// route the user should be sent to.
pub type SessionExpiredHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Run a request, refreshing the token and retrying once on `401`.
///
/// `$auth` is rebound to a fresh [`AuthContext`] before the retry so the
/// second attempt carries the newly stored token.
macro_rules! refresh_call {
    ($self:expr, $request:expr, $auth:ident, $call:expr) => {{
        let $auth = $self.auth_context();
        match $call {
            Err($crate::error::ClientError::RequestFailed { status: 401, .. })
                if $request.refreshes_on_unauthorized() =>
            {
                ::tracing::debug!(path = %$request.path(), "Access token rejected, refreshing");
                $self
                    .refresh_after_unauthorized($auth.token.as_ref())
                    .await?;
                let $auth = $self.auth_context();
                $call
            }
            other => other,
        }
    }};
}

/// Provisioning platform API client.
///
/// The client is cheap to share behind an `Arc`: all methods take `&self`
/// and session state lives in the [`SessionStore`].
///
/// ```rust,ignore
/// use provisio_client::ProvisioningClient;
///
/// let client = ProvisioningClient::builder()
///     .base_url("https://provisio.example.com".to_string())
///     .build()?;
/// let page = client.list_deployments(&Default::default(), &Default::default()).await?;
/// ```
pub struct ProvisioningClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session: Arc<dyn SessionStore>,
    pub(crate) refresh_lock: tokio::sync::Mutex<()>,
    pub(crate) login_route: String,
    pub(crate) on_session_expired: Option<SessionExpiredHook>,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) polling: PollingConfig,
}

impl fmt::Debug for ProvisioningClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisioningClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("login_route", &self.login_route)
            .field("on_session_expired", &self.on_session_expired.is_some())
            .field("metrics", &self.metrics)
            .field("polling", &self.polling)
            .finish()
    }
}

impl ProvisioningClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ProvisioningClientBuilder {
        builder::ProvisioningClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn polling(&self) -> PollingConfig {
        self.polling
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Whether an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.session.access_token().is_some()
    }

    pub(crate) fn auth_context(&self) -> AuthContext {
        AuthContext {
            token: self.session.access_token(),
            business_unit: self.session.business_unit_id(),
        }
    }

    async fn send_once(&self, request: &ApiRequest, auth: &AuthContext) -> Result<Option<Value>> {
        endpoints::send_api_request(
            &self.http,
            &self.base_url,
            auth,
            request,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Execute a request and return the raw JSON body.
    ///
    /// `Ok(None)` means the backend answered `204` or with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionExpired`] when a `401` could not be
    /// recovered by refreshing. See [`crate::endpoints::send_api_request`]
    /// for the other cases.
    pub async fn execute(&self, request: ApiRequest) -> Result<Option<Value>> {
        refresh_call!(self, request, auth, self.send_once(&request, &auth).await)
    }

    /// Execute a request and decode a required body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path().to_string();
        match self.execute(request).await? {
            Some(value) => decode(value),
            None => Err(ClientError::InvalidResponse(format!(
                "Empty response body from {}",
                path
            ))),
        }
    }

    /// Execute a request whose body may legitimately be empty.
    pub async fn fetch_optional<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        self.execute(request).await?.map(decode).transpose()
    }

    /// Execute a request and discard any body.
    pub async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::InvalidResponse(format!("Unexpected response shape: {}", e)))
}
