//! Token refresh endpoint.

use reqwest::Client;
use secrecy::SecretString;
use tracing::debug;

use provisio_config::constants::REFRESH_PATH;

use super::request::{ApiRequest, AuthContext, send_api_request};
use crate::metrics::MetricsCollector;
use crate::models::TokenPair;

/// Exchange the refresh cookie for a new access token.
///
/// Never errors: any transport failure, non-2xx status or malformed body is
/// logged at debug and reported as `None`.
pub async fn refresh_access_token(
    http: &Client,
    base_url: &str,
    metrics: Option<&MetricsCollector>,
) -> Option<SecretString> {
    let request = ApiRequest::post(REFRESH_PATH);

    match send_api_request(http, base_url, &AuthContext::default(), &request, metrics).await {
        Ok(Some(body)) => match serde_json::from_value::<TokenPair>(body) {
            Ok(pair) => Some(pair.access_token),
            Err(e) => {
                debug!(error = %e, "Refresh response had no access_token");
                None
            }
        },
        Ok(None) => {
            debug!("Refresh response was empty");
            None
        }
        Err(e) => {
            debug!(error = %e, "Token refresh failed");
            None
        }
    }
}
