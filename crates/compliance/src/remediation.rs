//! Remediation: enable row-level security on every non-compliant
//! `public`-schema table, one statement per project.

use supacheck_core::error::GatewayResult;
use supacheck_core::types::FixRlsResult;
use supacheck_core::ManagementApi;
use tracing::{info, warn};

/// One server-side loop per project: find every `public`-schema table with
/// RLS off and enable it. Issued as a single statement so a project costs
/// one query regardless of table count.
pub const ENABLE_RLS_QUERY: &str = r#"DO $$
DECLARE
    tbl RECORD;
BEGIN
    FOR tbl IN
        SELECT schemaname, tablename FROM pg_tables
        WHERE schemaname = 'public' AND rowsecurity = false
    LOOP
        EXECUTE format('ALTER TABLE %I.%I ENABLE ROW LEVEL SECURITY', tbl.schemaname, tbl.tablename);
    END LOOP;
END $$;"#;

/// Run the RLS fix against every project in the account.
///
/// Per-project failures are logged and skipped. A project counts as
/// processed when its statement did not raise; the post-state of the tables
/// is not verified. Only a failure to enumerate projects aborts the whole
/// operation.
pub async fn fix_rls_for_all_projects<A: ManagementApi>(api: &A) -> GatewayResult<FixRlsResult> {
    let projects = api.list_projects().await?;
    let total = projects.len();
    let mut processed = 0usize;

    for project in &projects {
        match api.execute_sql(&project.id, ENABLE_RLS_QUERY).await {
            Ok(_) => {
                processed += 1;
                info!(project_id = %project.id, "Enabled RLS on public tables");
            }
            Err(err) => {
                warn!(
                    project_id = %project.id,
                    error = %err,
                    "Skipping project after RLS fix failure"
                );
            }
        }
    }

    info!(processed, total, "RLS remediation pass complete");

    Ok(FixRlsResult {
        success: true,
        message: format!("Successfully processed {processed} out of {total} projects."),
    })
}
