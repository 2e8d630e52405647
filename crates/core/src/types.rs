//! Upstream entities and check result shapes.
//!
//! Entities deserialize with the management API's snake_case field names.
//! Result and summary objects serialize camelCase to match the documented
//! response contract (`totalUsers`, `passingCount`, `projectDetails`, ...).
//! Everything here is a plain value record built fresh inside one check
//! invocation; nothing is cached across requests.

use serde::{Deserialize, Serialize};

// ─── Upstream entities ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub role_name: String,
    pub mfa_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub host: String,
    pub version: String,
    pub postgres_engine: String,
    pub release_channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub region: String,
    pub status: String,
    pub database: DatabaseInfo,
    pub created_at: String,
}

/// One `pg_tables` row for a `public`-schema table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PgTable {
    pub schemaname: String,
    pub tablename: String,
    pub tableowner: String,
    pub tablespace: Option<String>,
    pub hasindexes: bool,
    pub hasrules: bool,
    pub hastriggers: bool,
    pub rowsecurity: bool,
}

/// Raw payload of a project's `/database/backups` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    pub pitr_enabled: bool,
    pub walg_enabled: bool,
}

/// A project joined with its backup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBackupInfo {
    pub id: String,
    pub name: String,
    pub region: String,
    pub pitr_enabled: bool,
    pub walg_enabled: bool,
}

// ─── Check results ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MfaSummary {
    pub total_users: usize,
    pub passing_count: usize,
    pub failing_count: usize,
    pub percentage_compliant: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfaCheckResult {
    pub passing: Vec<OrganizationMember>,
    pub failing: Vec<OrganizationMember>,
    pub summary: MfaSummary,
}

/// A project and every `public`-schema table observed in it. Emitted for
/// every project, including those with no tables at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTableInfo {
    pub project: Project,
    pub tables: Vec<PgTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RlsSummary {
    pub total_tables: usize,
    pub passing_count: usize,
    pub failing_count: usize,
    pub percentage_compliant: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RlsCheckResult {
    pub passing: Vec<PgTable>,
    pub failing: Vec<PgTable>,
    pub project_details: Vec<ProjectTableInfo>,
    pub summary: RlsSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PitrSummary {
    pub total_projects: usize,
    pub passing_count: usize,
    pub failing_count: usize,
    pub percentage_compliant: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitrCheckResult {
    pub passing: Vec<ProjectBackupInfo>,
    pub failing: Vec<ProjectBackupInfo>,
    pub summary: PitrSummary,
}

/// Outcome of the RLS remediation pass. `success` is always true once
/// project enumeration worked; per-project failures only lower the count
/// reported in `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixRlsResult {
    pub success: bool,
    pub message: String,
}
