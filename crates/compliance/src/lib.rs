pub mod checks;
pub mod remediation;
pub mod stats;

pub use checks::{check_mfa, check_pitr, check_rls};
pub use remediation::fix_rls_for_all_projects;

#[cfg(test)]
mod testutil;
