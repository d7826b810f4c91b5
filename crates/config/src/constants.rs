//! Centralized constants for the provisio workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Base URL used when nothing else is configured (local backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

// =============================================================================
// API Surface
// =============================================================================

/// Versioned path prefix shared by most resources.
pub const API_V1_PREFIX: &str = "/api/v1";

/// Endpoint that exchanges the refresh cookie for a new access token.
pub const REFRESH_PATH: &str = "/api/v1/auth/refresh";

/// Header carrying the active business unit (tenant scope).
pub const BUSINESS_UNIT_HEADER: &str = "X-Business-Unit-Id";

/// Route handed to the session-expired hook.
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

// =============================================================================
// Polling Defaults
// =============================================================================

/// Interval between deployment status fetches while provisioning.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Smallest accepted poll interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Hard cutoff for the watch that follows a retry action (5 minutes).
pub const DEFAULT_RETRY_WATCH_SECS: u64 = 300;

// =============================================================================
// List & Search Defaults
// =============================================================================

/// Default page size for paginated lists.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size accepted by the backend.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Quiet period before a typed search term takes effect.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
