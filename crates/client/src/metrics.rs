//! Metrics collection for API call performance.
//!
//! This module records, through the `metrics` crate facade:
//! - Request latency histograms
//! - Request and error counters
//! - Token refresh outcomes
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install any `metrics` recorder to collect them)
//!
//! # Invariants
//! - Labels are `endpoint`, `method`, `status`, `error_category`, `outcome`
//! - Endpoint labels have id-like path segments replaced with `:id`
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "provisio_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "provisio_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "provisio_api_errors_total";

/// Metric name for token refresh counter.
pub const METRIC_TOKEN_REFRESHES_TOTAL: &str = "provisio_api_token_refreshes_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, reset, DNS)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Refresh failed, user must log in again
    Session,
    /// Response body did not parse
    Decode,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Session => "session",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::SessionExpired => ErrorCategory::Session,
            ClientError::BusinessUnitContext { .. } => ErrorCategory::Http4xx,
            ClientError::RequestFailed { status, .. } if (400..500).contains(status) => {
                ErrorCategory::Http4xx
            }
            ClientError::RequestFailed { status, .. } if (500..600).contains(status) => {
                ErrorCategory::Http5xx
            }
            ClientError::HttpError(_) => ErrorCategory::Transport,
            ClientError::InvalidResponse(_) => ErrorCategory::Decode,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Collapse ids in a request path so label cardinality stays bounded.
///
/// `/api/v1/deployments/9f1c.../retry` becomes `/api/v1/deployments/:id/retry`.
pub fn endpoint_label(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    path.split('/')
        .map(|segment| {
            let looks_like_id = !segment.is_empty()
                && (segment.chars().all(|c| c.is_ascii_digit())
                    || uuid::Uuid::parse_str(segment).is_ok()
                    || (segment.len() >= 16 && segment.chars().any(|c| c.is_ascii_digit())));
            if looks_like_id { ":id" } else { segment }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Metrics collector for API calls.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one request attempt and its latency.
    pub fn record_request(&self, path: &str, method: &str, duration: Duration, status: Option<u16>) {
        if !self.enabled {
            return;
        }

        let endpoint = endpoint_label(path);
        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.clone(),
            "method" => method.to_string(),
            "status" => status_label.clone(),
        )
        .record(duration.as_secs_f64());

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint,
            "method" => method.to_string(),
            "status" => status_label,
        )
        .increment(1);
    }

    /// Record a failed call.
    pub fn record_error(&self, path: &str, method: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint_label(path),
            "method" => method.to_string(),
            "error_category" => ErrorCategory::from(error).as_str(),
        )
        .increment(1);
    }

    /// Record the outcome of a token refresh.
    pub fn record_refresh(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let outcome = if success { "success" } else { "failure" };
        metrics::counter!(METRIC_TOKEN_REFRESHES_TOTAL, "outcome" => outcome).increment(1);
    }
}
