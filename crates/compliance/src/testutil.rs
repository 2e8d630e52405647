//! Canned, call-counting `ManagementApi` implementation for check tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use supacheck_core::error::{GatewayError, GatewayResult};
use supacheck_core::types::{
    BackupConfig, DatabaseInfo, Organization, OrganizationMember, PgTable, Project,
};
use supacheck_core::ManagementApi;

use crate::checks::PG_TABLES_QUERY;

#[derive(Default)]
pub struct MockApi {
    organizations: Vec<Organization>,
    members: HashMap<String, Vec<OrganizationMember>>,
    projects: Vec<Project>,
    tables: HashMap<String, Vec<PgTable>>,
    backups: HashMap<String, BackupConfig>,
    sql_failures: HashSet<String>,
    fail_members: bool,
    fail_projects: bool,
    list_projects_calls: AtomicUsize,
}

impl MockApi {
    pub fn with_org(mut self, org: Organization, members: Vec<OrganizationMember>) -> Self {
        self.members.insert(org.id.clone(), members);
        self.organizations.push(org);
        self
    }

    pub fn with_project(mut self, project: Project, tables: Vec<PgTable>) -> Self {
        self.tables.insert(project.id.clone(), tables);
        self.projects.push(project);
        self
    }

    pub fn with_empty_project(self, project: Project) -> Self {
        self.with_project(project, Vec::new())
    }

    pub fn with_project_backup(mut self, project: Project, backup: BackupConfig) -> Self {
        self.backups.insert(project.id.clone(), backup);
        self.projects.push(project);
        self
    }

    /// Make every SQL statement against the given project fail.
    pub fn fail_sql_for(mut self, project_id: &str) -> Self {
        self.sql_failures.insert(project_id.to_string());
        self
    }

    pub fn fail_members(mut self) -> Self {
        self.fail_members = true;
        self
    }

    pub fn fail_project_listing(mut self) -> Self {
        self.fail_projects = true;
        self
    }

    pub fn list_projects_calls(&self) -> usize {
        self.list_projects_calls.load(Ordering::SeqCst)
    }
}

impl ManagementApi for MockApi {
    async fn list_organizations(&self) -> GatewayResult<Vec<Organization>> {
        Ok(self.organizations.clone())
    }

    async fn list_organization_members(
        &self,
        org_id: &str,
    ) -> GatewayResult<Vec<OrganizationMember>> {
        if self.fail_members {
            return Err(GatewayError::Upstream {
                status: 500,
                body: json!({"message": "member listing failed"}),
            });
        }
        Ok(self.members.get(org_id).cloned().unwrap_or_default())
    }

    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        if self.fail_projects {
            return Err(GatewayError::Unreachable);
        }
        self.list_projects_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.projects.clone())
    }

    async fn execute_sql(&self, project_id: &str, sql: &str) -> GatewayResult<serde_json::Value> {
        if self.sql_failures.contains(project_id) {
            return Err(GatewayError::Upstream {
                status: 500,
                body: json!({"message": "query failed"}),
            });
        }
        if sql == PG_TABLES_QUERY {
            let tables = self.tables.get(project_id).cloned().unwrap_or_default();
            return Ok(serde_json::to_value(tables).unwrap());
        }
        Ok(json!([]))
    }

    async fn get_backup_config(&self, project_id: &str) -> GatewayResult<BackupConfig> {
        self.backups.get(project_id).cloned().ok_or_else(|| {
            GatewayError::Fault(format!("no backup fixture for project {project_id}"))
        })
    }
}

pub fn org(id: &str, name: &str) -> Organization {
    Organization {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn member(user_name: &str, mfa_enabled: bool) -> OrganizationMember {
    OrganizationMember {
        user_id: format!("user-{user_name}"),
        user_name: user_name.to_string(),
        email: format!("{user_name}@example.com"),
        role_name: "developer".to_string(),
        mfa_enabled,
    }
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        organization_id: "org-a".to_string(),
        name: name.to_string(),
        region: "us-east-1".to_string(),
        status: "ACTIVE_HEALTHY".to_string(),
        database: DatabaseInfo {
            host: format!("db.{id}.supabase.co"),
            version: "15.1".to_string(),
            postgres_engine: "15".to_string(),
            release_channel: "ga".to_string(),
        },
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn pg_table(tablename: &str, rowsecurity: bool) -> PgTable {
    PgTable {
        schemaname: "public".to_string(),
        tablename: tablename.to_string(),
        tableowner: "postgres".to_string(),
        tablespace: None,
        hasindexes: true,
        hasrules: false,
        hastriggers: false,
        rowsecurity,
    }
}

pub fn backup(pitr_enabled: bool) -> BackupConfig {
    BackupConfig {
        pitr_enabled,
        walg_enabled: false,
    }
}
