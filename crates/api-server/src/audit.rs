//! File-backed audit log.
//!
//! Each check outcome is appended as one pretty-printed JSON block followed
//! by a blank line. The whole block goes out in a single `write_all` under a
//! mutex, so records from concurrent requests never interleave. Append
//! failures are logged and swallowed; an audit hiccup never fails a request.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use supacheck_core::AuditSink;
use tracing::{debug, error};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditRecord<'a> {
    timestamp: String,
    check_type: &'a str,
    data: &'a serde_json::Value,
}

pub struct FileAuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, check_type: &str, data: &serde_json::Value) -> std::io::Result<()> {
        let record = AuditRecord {
            timestamp: Utc::now().to_rfc3339(),
            check_type,
            data,
        };
        let mut block = serde_json::to_string_pretty(&record)?;
        block.push_str("\n\n");

        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())
    }
}

impl AuditSink for FileAuditLog {
    fn record(&self, check_type: &str, data: &serde_json::Value) {
        match self.append(check_type, data) {
            Ok(()) => debug!(check_type, path = %self.path.display(), "Audit record appended"),
            Err(err) => {
                error!(check_type, error = %err, "Failed to append audit record");
            }
        }
    }
}
