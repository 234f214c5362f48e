//! Verify invocation use case
//!
//! Reconciles a plan with what actually ran and appends the outcome to the
//! audit log. A failed append is reported but never changes the verdict.

use super::load_context::PlanningContext;
use crate::ports::audit_log::{AuditLog, AuditRecord};
use chrono::{DateTime, Utc};
use rollcall_domain::{ExecutionReport, InvocationPlan, InvocationResult, verify};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct VerifyInvocationOutput {
    pub result: InvocationResult,
    pub audit_record: AuditRecord,
    /// Set when the audit record could not be written
    pub audit_error: Option<String>,
}

pub struct VerifyInvocationUseCase<'a> {
    context: &'a PlanningContext,
    audit_log: Arc<dyn AuditLog>,
}

impl<'a> VerifyInvocationUseCase<'a> {
    pub fn new(context: &'a PlanningContext, audit_log: Arc<dyn AuditLog>) -> Self {
        Self { context, audit_log }
    }

    pub fn execute(&self, plan: &InvocationPlan, report: &ExecutionReport) -> VerifyInvocationOutput {
        self.execute_at(plan, report, Utc::now())
    }

    /// Verify with an explicit timestamp for the audit record.
    pub fn execute_at(
        &self,
        plan: &InvocationPlan,
        report: &ExecutionReport,
        at: DateTime<Utc>,
    ) -> VerifyInvocationOutput {
        let result = verify(plan, report, &self.context.config);

        if result.success {
            info!(
                "Invocation verified: {}/{} agents ({:.1}%)",
                result.agents_invoked.len(),
                result.planned_count(),
                result.completion_rate * 100.0
            );
        } else {
            for issue in &result.issues {
                warn!("Invocation issue: {}", issue);
            }
        }
        if !result.agents_unplanned.is_empty() {
            warn!(
                "Agents ran outside the plan: {}",
                result.agents_unplanned.join(", ")
            );
        }

        let audit_record = AuditRecord::from_result(&result, at);
        let audit_error = match self.audit_log.append(&audit_record) {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to write audit record {}: {}", audit_record.id, e);
                Some(e.to_string())
            }
        };

        VerifyInvocationOutput {
            result,
            audit_record,
            audit_error,
        }
    }
}
