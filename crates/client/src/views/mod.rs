//! Headless view controllers.
//!
//! These own the state a page keeps between fetches (search text, filters,
//! paging, selections) and never talk to the network themselves. Front ends
//! fetch through [`crate::ProvisioningClient`] and feed results in.

pub mod audit;
pub mod catalog;
pub mod debounce;
pub mod roles;
pub mod wizard;

pub use audit::AuditLogView;
pub use catalog::{AccessFilter, CatalogView};
pub use debounce::Debounced;
pub use roles::RoleEditor;
pub use wizard::{ProvisionWizard, WizardIssue, WizardStep};
