//! Single-attempt request execution and response decoding.
//!
//! Responsibilities:
//! - Attach the JSON content type, bearer token and tenant-scope header.
//! - Send one attempt and record request metrics for it.
//! - Map non-2xx responses to [`ClientError`] using the server's message.
//! - Decode success bodies, treating `204` and empty bodies as no content.
//!
//! Does NOT handle:
//! - Token refresh on `401` (see `client::session`).
//! - Retries of any kind.
//!
//! Invariants:
//! - Paths are appended to the base URL verbatim, never rewritten.
//! - Multipart requests leave `Content-Type` to the multipart encoder.

use std::fmt;
use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use provisio_config::constants::{BUSINESS_UNIT_HEADER, REFRESH_PATH};

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A file sent as one part of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl FilePart {
    /// Build a fresh form. Forms are single-use, so a retry needs a new one.
    fn to_form(&self) -> Result<reqwest::multipart::Form> {
        let mut part =
            reqwest::multipart::Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        if let Some(mime) = &self.mime {
            part = part.mime_str(mime)?;
        }
        Ok(reqwest::multipart::Form::new().part(self.field.clone(), part))
    }
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

/// Description of one API call, replayable after a token refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    headers: Vec<(String, String)>,
    refresh_on_unauthorized: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            refresh_on_unauthorized: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Do not attempt a token refresh when this request gets a `401`.
    ///
    /// Used for credential submission, where a `401` means bad credentials.
    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// The refresh endpoint itself is never refreshed.
    pub fn refreshes_on_unauthorized(&self) -> bool {
        self.refresh_on_unauthorized && self.path != REFRESH_PATH
    }
}

/// Credentials and tenant scope attached to a request.
#[derive(Clone, Default)]
pub struct AuthContext {
    pub token: Option<SecretString>,
    pub business_unit: Option<Uuid>,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("business_unit", &self.business_unit)
            .finish()
    }
}

impl AuthContext {
    fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }
        if let Some(id) = self.business_unit {
            builder = builder.header(BUSINESS_UNIT_HEADER, id.to_string());
        }
        builder
    }
}

/// Send `request` once and decode the response.
///
/// Returns `Ok(None)` for `204` and empty bodies.
///
/// # Errors
///
/// - [`ClientError::HttpError`] on transport failure.
/// - [`ClientError::RequestFailed`] for non-2xx (including `401`).
/// - [`ClientError::BusinessUnitContext`] for a `400` about a missing business unit.
/// - [`ClientError::InvalidResponse`] when a 2xx body is not JSON.
pub async fn send_api_request(
    http: &Client,
    base_url: &str,
    auth: &AuthContext,
    request: &ApiRequest,
    metrics: Option<&MetricsCollector>,
) -> Result<Option<Value>> {
    let url = format!("{}{}", base_url, request.path);
    let mut builder = http.request(request.method.clone(), &url);

    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }

    builder = match &request.body {
        RequestBody::Empty => builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE),
        RequestBody::Json(value) => builder
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(value)?),
        RequestBody::Multipart(part) => builder.multipart(part.to_form()?),
    };

    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = auth.apply(builder);

    let method = request.method.as_str();
    debug!(method, path = %request.path, "Sending request");

    let started = Instant::now();
    let result = match builder.send().await {
        Ok(response) => {
            if let Some(m) = metrics {
                m.record_request(
                    &request.path,
                    method,
                    started.elapsed(),
                    Some(response.status().as_u16()),
                );
            }
            read_response(response).await
        }
        Err(e) => {
            if let Some(m) = metrics {
                m.record_request(&request.path, method, started.elapsed(), None);
            }
            let err = ClientError::from(e);
            if err.is_transient() {
                debug!(path = %request.path, error = %err, "Transient network failure");
            }
            Err(err)
        }
    };

    if let (Err(e), Some(m)) = (&result, metrics) {
        m.record_error(&request.path, method, e);
    }
    result
}

/// Decode a response: JSON on success, a typed error otherwise.
pub async fn read_response(response: Response) -> Result<Option<Value>> {
    let status = response.status();
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let text = response.text().await?;
        return parse_body(&text);
    }

    let text = response.text().await.unwrap_or_default();
    Err(error_from_response(status, &text))
}

/// Parse a success body. Empty or whitespace-only bodies are no content.
pub fn parse_body(text: &str) -> Result<Option<Value>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(format!("Response is not valid JSON: {}", e)))
}

/// Build the error for a non-2xx response.
pub fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    let message = error_message(status, body);
    if status == StatusCode::BAD_REQUEST && mentions_business_unit(&message) {
        ClientError::BusinessUnitContext { message }
    } else {
        ClientError::RequestFailed {
            status: status.as_u16(),
            message,
        }
    }
}

/// Human-readable message for a failed response.
///
/// Order: `detail` (a string, or the `msg` entries of a validation error
/// list), then `message`, then `error`, then the HTTP status text.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(message_from_json)
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => reason.to_string(),
            None => format!("HTTP {}", status.as_u16()),
        })
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn message_from_json(body: &Value) -> Option<String> {
    if let Some(detail) = body.get("detail") {
        let from_detail = match detail {
            Value::String(s) => non_blank(s),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => non_blank(s),
                        other => other.get("msg").and_then(Value::as_str).and_then(non_blank),
                    })
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            Value::Object(_) => detail
                .get("message")
                .or_else(|| detail.get("msg"))
                .and_then(Value::as_str)
                .and_then(non_blank),
            _ => None,
        };
        if from_detail.is_some() {
            return from_detail;
        }
    }

    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).and_then(non_blank))
}

/// True when a `400` message is about a missing tenant scope.
pub fn mentions_business_unit(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("business unit")
        || lower.contains("business_unit")
        || lower.contains("x-business-unit-id")
}
