//! Invocation verification.
//!
//! Reconciles an [`InvocationPlan`] with what the execution layer reports
//! actually happened. Every planned agent ends up in exactly one of three
//! partitions (invoked, failed, skipped), and the result records whether
//! the run is complete enough to trust.

use super::plan::InvocationPlan;
use crate::config::InvocationConfig;
use crate::core::string::join_ids;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What the execution layer reports after running a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionReport {
    /// Agents that ran to completion
    pub invoked: Vec<String>,
    /// Agents that were attempted but failed
    pub failed: Vec<String>,
    /// Wall-clock minutes the execution took, if measured
    pub elapsed_minutes: Option<f64>,
}

impl ExecutionReport {
    pub fn new<I, S>(invoked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            invoked: invoked.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_failed<I, S>(mut self, failed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failed = failed.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_elapsed_minutes(mut self, minutes: f64) -> Self {
        self.elapsed_minutes = Some(minutes);
        self
    }
}

/// The reconciliation of a plan against an execution report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub plan: InvocationPlan,
    pub agents_invoked: Vec<String>,
    pub agents_failed: Vec<String>,
    pub agents_skipped: Vec<String>,
    /// Reported agents that were not part of the plan
    #[serde(default)]
    pub agents_unplanned: Vec<String>,
    /// `|invoked| / |planned|`, exactly 0 for an empty plan
    pub completion_rate: f64,
    /// Minutes reported by the execution layer (0 when unknown)
    pub actual_time: f64,
    pub actual_cost: f64,
    pub success: bool,
    /// Reasons for a non-successful result, in check order
    pub issues: Vec<String>,
}

impl InvocationResult {
    pub fn planned_count(&self) -> usize {
        self.plan.agent_count()
    }

    /// Skipped agents that the plan marked critical.
    pub fn critical_skipped(&self) -> Vec<&str> {
        self.plan
            .critical_agents
            .iter()
            .filter(|id| self.agents_skipped.contains(id))
            .map(String::as_str)
            .collect()
    }
}

/// Completion rate with the empty-plan case defined as exactly zero.
pub fn completion_rate(invoked: usize, planned: usize) -> f64 {
    if planned == 0 {
        0.0
    } else {
        invoked as f64 / planned as f64
    }
}

/// Verify `plan` against `report`.
///
/// A result is unsuccessful when a critical agent was skipped or when the
/// completion rate of a non-empty plan falls below
/// `config.policy.completion_threshold`; each condition adds its own issue.
/// An agent reported both invoked and failed counts as failed. An empty
/// plan verifies successfully with a completion rate of 0.
pub fn verify(
    plan: &InvocationPlan,
    report: &ExecutionReport,
    config: &InvocationConfig,
) -> InvocationResult {
    let invoked: HashSet<&str> = report.invoked.iter().map(String::as_str).collect();
    let failed: HashSet<&str> = report.failed.iter().map(String::as_str).collect();

    let mut agents_invoked = Vec::new();
    let mut agents_failed = Vec::new();
    let mut agents_skipped = Vec::new();
    for agent in &plan.agents_to_invoke {
        if failed.contains(agent.as_str()) {
            agents_failed.push(agent.clone());
        } else if invoked.contains(agent.as_str()) {
            agents_invoked.push(agent.clone());
        } else {
            agents_skipped.push(agent.clone());
        }
    }

    let mut agents_unplanned: Vec<String> = Vec::new();
    for agent in report.invoked.iter().chain(&report.failed) {
        if !plan.includes(agent) && !agents_unplanned.contains(agent) {
            agents_unplanned.push(agent.clone());
        }
    }

    let completion_rate = completion_rate(agents_invoked.len(), plan.agent_count());

    let mut issues = Vec::new();
    let critical_skipped: Vec<&String> = plan
        .critical_agents
        .iter()
        .filter(|id| agents_skipped.contains(id))
        .collect();
    if !critical_skipped.is_empty() {
        issues.push(format!(
            "Critical agents were skipped: {}",
            join_ids(&critical_skipped)
        ));
    }
    if !plan.is_empty() && completion_rate < config.policy.completion_threshold {
        issues.push(format!(
            "Low completion rate: {:.1}%",
            completion_rate * 100.0
        ));
    }

    InvocationResult {
        plan: plan.clone(),
        actual_time: report.elapsed_minutes.unwrap_or(0.0),
        actual_cost: config.resources.cost_of(agents_invoked.len()),
        success: issues.is_empty(),
        agents_invoked,
        agents_failed,
        agents_skipped,
        agents_unplanned,
        completion_rate,
        issues,
    }
}
