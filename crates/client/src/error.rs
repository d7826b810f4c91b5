//! Error types for the provisioning client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The access token was rejected and could not be refreshed.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Non-2xx response from the backend.
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// A 400 response reporting that no business unit was selected.
    #[error("Business unit context required: {message}")]
    BusinessUnitContext { message: String },

    /// Transport-level failure (connection refused, reset, DNS, timeout).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Input rejected locally before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::BusinessUnitContext { .. } => Some(400),
            Self::SessionExpired => Some(401),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::SessionExpired) || self.status() == Some(401)
    }

    /// Check if this is a not-found response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestFailed { status: 404, .. })
    }

    /// True for connection-level failures that usually mean the backend is
    /// restarting. Callers that poll should keep going rather than surface them.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_connect() || e.is_timeout() || is_reset_message(e),
            _ => false,
        }
    }
}

fn is_reset_message(err: &reqwest::Error) -> bool {
    let text = err.to_string().to_lowercase();
    text.contains("connection reset")
        || text.contains("connection closed")
        || text.contains("failed to fetch")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display() {
        let err = ClientError::RequestFailed {
            status: 409,
            message: "Deployment already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed (409): Deployment already exists"
        );
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(ClientError::SessionExpired.is_auth_error());
        assert!(
            ClientError::RequestFailed {
                status: 401,
                message: "Unauthorized".to_string()
            }
            .is_auth_error()
        );
        assert!(
            !ClientError::RequestFailed {
                status: 403,
                message: "Forbidden".to_string()
            }
            .is_auth_error()
        );
    }

    #[test]
    fn test_business_unit_context_reports_400() {
        let err = ClientError::BusinessUnitContext {
            message: "Business unit required".to_string(),
        };
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_not_found() {
        let err = ClientError::RequestFailed {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!ClientError::InvalidResponse("x".to_string()).is_not_found());
    }
}
