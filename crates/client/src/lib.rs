//! Provisioning platform API client.
//!
//! This crate provides a typed client for the self-service provisioning
//! backend: an authenticated HTTP layer that refreshes an expired access
//! token once per call, resource methods for every backend collection, and
//! headless view controllers for the catalog, wizard, role editor and audit
//! log screens.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
pub mod permissions;
mod serde_helpers;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod views;

pub use auth::{FileSessionStore, MemorySessionStore, SessionStore};
pub use client::builder::ProvisioningClientBuilder;
pub use client::{Crud, ProvisioningClient, SessionExpiredHook, WatchOutcome};
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    AccessRequest, AccessRequestStatus, AuditLog, AuditLogFilter, BusinessUnit,
    BusinessUnitParams, CostItem, CostSummary, CreateDeploymentParams, CurrentUser, Deployment,
    DeploymentCost, DeploymentFilter, DeploymentStatus, DeploymentType, Group, GroupParams,
    ListQuery, Notification, OidcExchange, Page, Permission, Plugin, PluginInput, PluginPackage,
    Role, RoleParams, User, UserParams,
};
