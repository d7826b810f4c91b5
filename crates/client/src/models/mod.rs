//! Data models for backend API responses and request bodies.
//!
//! Invariants:
//! - Unknown JSON fields are ignored.
//! - Unknown status strings are preserved, never a parse error.
//! - Identifiers are exposed as `String` whether sent as numbers or strings.

mod audit;
mod auth;
mod business_units;
mod common;
mod cost;
mod deployments;
mod groups;
mod notifications;
mod plugins;
mod roles;
mod users;

pub use audit::{AuditLog, AuditLogFilter};
pub use auth::{CurrentUser, LoginRequest, OidcExchange, TokenPair};
pub use business_units::{BusinessUnit, BusinessUnitParams};
pub use common::{ListQuery, Page};
pub use cost::{CostItem, CostSummary, DeploymentCost};
pub use deployments::{CreateDeploymentParams, Deployment, DeploymentFilter, DeploymentStatus};
pub use groups::{Group, GroupParams};
pub use notifications::Notification;
pub use plugins::{
    AccessRequest, AccessRequestStatus, DeploymentType, Plugin, PluginInput, PluginPackage,
};
pub use roles::{Permission, Role, RoleParams};
pub use users::{User, UserParams};
