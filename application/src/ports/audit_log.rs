//! Port for the invocation audit log.
//!
//! Every completed verification produces one [`AuditRecord`]. Records are
//! appended, never rewritten, and keyed by an identifier derived from the
//! verification timestamp.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, this port captures an auditable history of
//! what was planned and what actually ran.

use chrono::{DateTime, Utc};
use rollcall_domain::InvocationResult;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One audit entry, flattened from an [`InvocationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Timestamp-derived key, e.g. `invocation_20250114_093015_042`
    pub id: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub request: String,
    pub request_type: String,
    pub agents_planned: usize,
    pub agents_invoked: usize,
    pub agents_failed: Vec<String>,
    pub agents_skipped: Vec<String>,
    pub completion_rate: f64,
    pub success: bool,
    pub issues: Vec<String>,
    pub estimated_time: f64,
    pub actual_time: f64,
    pub estimated_cost: f64,
    pub actual_cost: f64,
}

impl AuditRecord {
    pub fn from_result(result: &InvocationResult, at: DateTime<Utc>) -> Self {
        Self {
            id: Self::id_for(at),
            timestamp: at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            request: result.plan.request_text.clone(),
            request_type: result.plan.request_type.clone(),
            agents_planned: result.planned_count(),
            agents_invoked: result.agents_invoked.len(),
            agents_failed: result.agents_failed.clone(),
            agents_skipped: result.agents_skipped.clone(),
            completion_rate: result.completion_rate,
            success: result.success,
            issues: result.issues.clone(),
            estimated_time: result.plan.estimated_time,
            actual_time: result.actual_time,
            estimated_cost: result.plan.estimated_cost,
            actual_cost: result.actual_cost,
        }
    }

    /// Record key for a timestamp (millisecond resolution).
    pub fn id_for(at: DateTime<Utc>) -> String {
        format!("invocation_{}", at.format("%Y%m%d_%H%M%S_%3f"))
    }
}

/// Port for appending audit records.
pub trait AuditLog: Send + Sync {
    fn append(&self, record: &AuditRecord) -> std::io::Result<()>;
}

/// No-op implementation for `--no-audit` and tests that don't care.
pub struct NoAuditLog;

impl AuditLog for NoAuditLog {
    fn append(&self, _record: &AuditRecord) -> std::io::Result<()> {
        Ok(())
    }
}

/// Keeps appended records in memory.
#[derive(Default)]
pub struct RecordingAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditLog for RecordingAuditLog {
    fn append(&self, record: &AuditRecord) -> std::io::Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| std::io::Error::other("audit log mutex poisoned"))?;
        records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rollcall_domain::{
        AgentRecord, AgentSelection, ExecutionReport, InvocationConfig, Roster, build_plan, verify,
    };

    fn sample_result() -> InvocationResult {
        let roster = Roster::from_records(["a", "b"].map(AgentRecord::new)).with_critical_agents(["a"]);
        let config = InvocationConfig::new()
            .with_alias("pair", ["pair"])
            .with_rule("pair", AgentSelection::agents(["a", "b"]));
        let plan = build_plan("pair review", &config, &roster);
        verify(&plan, &ExecutionReport::new(["a"]), &config)
    }

    #[test]
    fn test_id_is_timestamp_derived() {
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 15).unwrap();
        assert_eq!(AuditRecord::id_for(at), "invocation_20250114_093015_000");
    }

    #[test]
    fn test_from_result_flattens_counts() {
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 15).unwrap();
        let record = AuditRecord::from_result(&sample_result(), at);

        assert_eq!(record.request, "pair review");
        assert_eq!(record.request_type, "pair");
        assert_eq!(record.agents_planned, 2);
        assert_eq!(record.agents_invoked, 1);
        assert_eq!(record.agents_skipped, vec!["b".to_string()]);
        assert_eq!(record.completion_rate, 0.5);
        assert!(!record.success);
        assert_eq!(record.timestamp, "2025-01-14T09:30:15.000Z");
    }

    #[test]
    fn test_recording_audit_log_keeps_order() {
        let log = RecordingAuditLog::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 15).unwrap();
        let mut record = AuditRecord::from_result(&sample_result(), at);
        log.append(&record).unwrap();
        record.id = "second".to_string();
        log.append(&record).unwrap();

        let ids: Vec<String> = log.records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["invocation_20250114_093015_000", "second"]);
    }
}
