//! Session lifecycle methods on [`ProvisioningClient`].
//!
//! Responsibilities:
//! - Refresh the access token after a `401`, single-flighted across
//!   concurrent callers.
//! - Expire the session (clear the token, notify the hook) when refresh fails.
//! - Login, logout, current user and OIDC code exchange.
//! - Select or clear the active business unit.
//!
//! Does NOT handle:
//! - Where the token is stored (see [`crate::auth::SessionStore`]).
//! - The HTTP exchange of the refresh call (see [`crate::endpoints`]).
//!
//! Invariants:
//! - The refresh lock is held for the whole refresh exchange.
//! - A caller whose rejected token was already replaced by another caller's
//!   refresh reuses the new token instead of refreshing again.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use provisio_config::BusinessUnitRef;

use crate::client::ProvisioningClient;
use crate::endpoints::{self, ApiRequest};
use crate::error::{ClientError, Result};
use crate::models::{BusinessUnit, CurrentUser, LoginRequest, OidcExchange, TokenPair};

const LOGIN_PATH: &str = "/api/v1/auth/login";
const LOGOUT_PATH: &str = "/api/v1/auth/logout";
const ME_PATH: &str = "/api/v1/auth/me";
const OIDC_TOKEN_PATH: &str = "/api/v1/auth/oidc/token";

impl ProvisioningClient {
    /// Try to obtain a new access token from the refresh cookie.
    ///
    /// Returns `true` and stores the token on success. Never errors.
    pub async fn refresh(&self) -> bool {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> bool {
        let token =
            endpoints::refresh_access_token(&self.http, &self.base_url, self.metrics.as_ref())
                .await;
        let success = token.is_some();
        if let Some(token) = token {
            self.session.set_access_token(token);
            debug!("Access token refreshed");
        }
        if let Some(m) = &self.metrics {
            m.record_refresh(success);
        }
        success
    }

    /// Recover from a `401` received while sending `rejected`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionExpired`] after clearing the token and
    /// running the session-expired hook when refresh fails, and without
    /// either when a concurrent refresh already failed.
    pub(crate) async fn refresh_after_unauthorized(
        &self,
        rejected: Option<&SecretString>,
    ) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        match (self.session.access_token(), rejected) {
            (Some(current), Some(old)) if old.expose_secret() != current.expose_secret() => {
                debug!("Token already replaced by a concurrent refresh");
                return Ok(());
            }
            (Some(_), None) => {
                debug!("Token already replaced by a concurrent refresh");
                return Ok(());
            }
            (None, Some(_)) => {
                debug!("Session already expired by a concurrent refresh");
                return Err(ClientError::SessionExpired);
            }
            _ => {}
        }

        if self.refresh_locked().await {
            Ok(())
        } else {
            self.expire_session();
            Err(ClientError::SessionExpired)
        }
    }

    /// Forget the token and tell the embedding application to send the user
    /// to the login route.
    pub(crate) fn expire_session(&self) {
        self.session.clear_access_token();
        info!(login_route = %self.login_route, "Session expired");
        if let Some(hook) = &self.on_session_expired {
            hook(&self.login_route);
        }
    }

    /// Log in with an email address or username and a password.
    ///
    /// A `401` here means bad credentials and is returned as-is.
    pub async fn login(&self, identifier: &str, password: &SecretString) -> Result<CurrentUser> {
        let body = LoginRequest {
            identifier: identifier.to_string(),
            password: password.clone(),
        };
        let request = ApiRequest::post(LOGIN_PATH).json(&body)?.without_refresh();
        let pair: TokenPair = self.fetch(request).await?;
        self.session.set_access_token(pair.access_token);
        info!("Logged in");
        self.me().await
    }

    /// Exchange an OIDC authorization code for an access token.
    pub async fn exchange_oidc_code(&self, exchange: &OidcExchange) -> Result<CurrentUser> {
        let request = ApiRequest::post(OIDC_TOKEN_PATH)
            .json(exchange)?
            .without_refresh();
        let pair: TokenPair = self.fetch(request).await?;
        self.session.set_access_token(pair.access_token);
        info!("Logged in via OIDC");
        self.me().await
    }

    /// Log out. The local token is cleared even when the backend call fails.
    ///
    /// A `401` counts as success: the server already considers the session
    /// gone.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .send(ApiRequest::post(LOGOUT_PATH).without_refresh())
            .await;
        self.session.clear_access_token();
        match result {
            Err(e) if e.is_auth_error() => Ok(()),
            Err(e) => {
                warn!(error = %e, "Logout request failed; local session cleared anyway");
                Err(e)
            }
            Ok(()) => Ok(()),
        }
    }

    /// Identity behind the current token.
    pub async fn me(&self) -> Result<CurrentUser> {
        self.fetch(ApiRequest::get(ME_PATH)).await
    }

    /// Make `business_unit` the tenant scope for subsequent requests.
    pub fn select_business_unit(&self, business_unit: &BusinessUnit) {
        self.session
            .set_active_business_unit(Some(business_unit.to_ref()));
        info!(business_unit = %business_unit.name, "Active business unit selected");
    }

    /// Drop the tenant scope.
    pub fn clear_business_unit(&self) {
        self.session.set_active_business_unit(None);
        info!("Active business unit cleared");
    }

    pub fn active_business_unit(&self) -> Option<BusinessUnitRef> {
        self.session.active_business_unit()
    }
}
