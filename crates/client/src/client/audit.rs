//! Audit log client methods. Read-only.

use crate::client::ProvisioningClient;
use crate::error::Result;
use crate::models::{AuditLog, AuditLogFilter, ListQuery, Page};

const AUDIT_LOGS_PATH: &str = "/api/v1/audit-logs";

impl ProvisioningClient {
    /// One page of audit entries matching `filter`.
    pub async fn list_audit_logs(
        &self,
        query: &ListQuery,
        filter: &AuditLogFilter,
    ) -> Result<Page<AuditLog>> {
        let query = filter.apply(query.clone());
        self.crud::<AuditLog>(AUDIT_LOGS_PATH).list(&query).await
    }
}
