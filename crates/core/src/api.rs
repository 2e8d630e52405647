//! Collaborator seams between the HTTP surface, the compliance logic, and
//! the outside world.

use crate::error::GatewayResult;
use crate::types::{BackupConfig, Organization, OrganizationMember, Project};

/// The slice of the Supabase management API consumed by the compliance
/// checks: list organizations, list an organization's members, list
/// projects, execute a SQL statement against a project's database, and
/// fetch a project's backup configuration.
///
/// Implementations attach the caller's bearer credential; the checks are
/// generic over this trait so tests can substitute a canned, call-counting
/// implementation.
#[allow(async_fn_in_trait)]
pub trait ManagementApi {
    async fn list_organizations(&self) -> GatewayResult<Vec<Organization>>;

    async fn list_organization_members(
        &self,
        org_id: &str,
    ) -> GatewayResult<Vec<OrganizationMember>>;

    async fn list_projects(&self) -> GatewayResult<Vec<Project>>;

    /// Run a SQL statement against a project's database. Returns the raw
    /// rows; callers decode the shape they expect.
    async fn execute_sql(
        &self,
        project_id: &str,
        sql: &str,
    ) -> GatewayResult<serde_json::Value>;

    async fn get_backup_config(&self, project_id: &str) -> GatewayResult<BackupConfig>;
}

/// Append-only audit log. Implementations must write each record atomically
/// with respect to concurrent callers and must swallow their own failures;
/// a check never fails because its audit record could not be written.
pub trait AuditSink: Send + Sync {
    fn record(&self, check_type: &str, data: &serde_json::Value);
}
