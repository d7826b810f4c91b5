//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use provisio_client::ClientError;

/// Structured exit codes for `provisio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// The session expired or the credentials were rejected.
    ///
    /// Scripts should run `provisio auth login` again.
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Deployment, plugin, role, etc. does not exist.
    NotFound = 4,

    /// Bad input, rejected locally or by the backend.
    ValidationError = 5,

    /// Insufficient privileges (HTTP 403).
    PermissionDenied = 6,

    /// The backend asked for a business unit and none is selected.
    ///
    /// Scripts should run `provisio business-units select <id>`.
    BusinessUnitRequired = 9,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::SessionExpired => ExitCode::AuthenticationFailed,
            ClientError::BusinessUnitContext { .. } => ExitCode::BusinessUnitRequired,

            ClientError::RequestFailed { status: 401, .. } => ExitCode::AuthenticationFailed,
            ClientError::RequestFailed { status: 403, .. } => ExitCode::PermissionDenied,
            ClientError::RequestFailed { status: 404, .. } => ExitCode::NotFound,
            ClientError::RequestFailed {
                status: 400 | 409 | 422,
                ..
            } => ExitCode::ValidationError,
            ClientError::RequestFailed { .. } => ExitCode::GeneralError,

            ClientError::Validation(_) => ExitCode::ValidationError,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ExitCode::GeneralError
            }
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() || err.is_transient() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ClientError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ClientError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
