//! Invocation plan construction.
//!
//! [`build_plan`] turns a request into an [`InvocationPlan`]: classify,
//! select, check critical coverage, estimate resources, decide whether
//! confirmation is needed, and collect advisory warnings. Building a plan
//! never fails and has no hidden inputs, so identical inputs always give
//! identical plans.

use super::classifier::classify;
use super::selector::{Selection, select};
use crate::agent::Roster;
use crate::config::InvocationConfig;
use crate::core::string::join_ids;
use serde::{Deserialize, Serialize};

/// The intended set of agents and resource estimate for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationPlan {
    /// Original request, verbatim
    pub request_text: String,
    pub request_type: String,
    /// Agents to invoke, without duplicates
    pub agents_to_invoke: Vec<String>,
    /// Estimated minutes
    pub estimated_time: f64,
    pub estimated_cost: f64,
    pub requires_confirmation: bool,
    /// True iff every critical agent is in `agents_to_invoke`
    pub critical_agents_included: bool,
    /// Advisory messages, in fixed order; never block the plan
    pub warnings: Vec<String>,
    /// The roster's critical list at planning time
    #[serde(default)]
    pub critical_agents: Vec<String>,
    /// Critical agents not in `agents_to_invoke`
    #[serde(default)]
    pub missing_critical: Vec<String>,
    /// Agents appended by complete-group expansion
    #[serde(default)]
    pub added_for_completeness: Vec<String>,
    /// Whether the selection came from the fallback policy
    #[serde(default)]
    pub used_fallback: bool,
}

impl InvocationPlan {
    pub fn agent_count(&self) -> usize {
        self.agents_to_invoke.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents_to_invoke.is_empty()
    }

    pub fn includes(&self, id: &str) -> bool {
        self.agents_to_invoke.iter().any(|agent| agent == id)
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.critical_agents.iter().any(|critical| critical == id)
    }

    /// Critical agents that made it into the plan.
    pub fn included_critical(&self) -> impl Iterator<Item = &str> {
        self.critical_agents
            .iter()
            .filter(|id| self.includes(id))
            .map(String::as_str)
    }
}

/// Compare a selection against the critical list.
///
/// Returns `(all_included, missing)`.
pub fn check_critical_agents(agents: &[String], critical: &[String]) -> (bool, Vec<String>) {
    let missing: Vec<String> = critical
        .iter()
        .filter(|id| !agents.contains(id))
        .cloned()
        .collect();
    (missing.is_empty(), missing)
}

/// Build the plan for `request_text`.
pub fn build_plan(request_text: &str, config: &InvocationConfig, roster: &Roster) -> InvocationPlan {
    build_plan_for(request_text, classify(request_text, config), config, roster)
}

/// Build the plan for a request that has already been classified.
pub fn build_plan_for(
    request_text: &str,
    request_type: String,
    config: &InvocationConfig,
    roster: &Roster,
) -> InvocationPlan {
    let selection = select(&request_type, config, roster);
    let used_fallback = selection.is_fallback();
    let Selection {
        agents,
        added_for_completeness,
        ..
    } = selection;

    let critical_agents = roster.critical_agents().to_vec();
    let (critical_agents_included, missing_critical) =
        check_critical_agents(&agents, &critical_agents);

    let count = agents.len();
    let estimate = config.resources.estimate(count);
    let requires_confirmation = count > config.safety_checks.require_confirmation_above;

    let mut warnings = Vec::new();
    if !missing_critical.is_empty() {
        warnings.push(format!(
            "CRITICAL agents missing: {}",
            join_ids(&missing_critical)
        ));
    }
    if !added_for_completeness.is_empty() {
        warnings.push(format!(
            "Added for completeness: {}",
            join_ids(&added_for_completeness)
        ));
    }
    if count > config.policy.large_invocation_above {
        warnings.push(format!(
            "Large invocation: {} agents will take ~{:.1} minutes",
            count, estimate.time
        ));
    }
    for issue in config.issues_for(&request_type) {
        warnings.push(format!(
            "Configuration entry '{}' was ignored: {}",
            issue.subject, issue.message
        ));
    }

    InvocationPlan {
        request_text: request_text.to_string(),
        request_type,
        agents_to_invoke: agents,
        estimated_time: estimate.time,
        estimated_cost: estimate.cost,
        requires_confirmation,
        critical_agents_included,
        warnings,
        critical_agents,
        missing_critical,
        added_for_completeness,
        used_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRecord;
    use crate::config::{
        AgentSelection, CompleteGroup, ConfigIssue, ConfigIssueCode, ResourceRates,
    };

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn abc_roster() -> Roster {
        Roster::from_records(["a", "b", "c"].map(AgentRecord::new)).with_critical_agents(["a"])
    }

    #[test]
    fn test_prebuilt_classification_is_used_verbatim() {
        let config = InvocationConfig::new().with_rule("t", AgentSelection::agents(["b"]));
        let plan = build_plan_for("anything at all", "t".to_string(), &config, &abc_roster());
        assert_eq!(plan.request_type, "t");
        assert_eq!(plan.request_text, "anything at all");
        assert_eq!(plan.agents_to_invoke, ids(&["b"]));
    }

    fn numbered_roster(n: usize) -> Roster {
        Roster::from_records((0..n).map(|i| AgentRecord::new(format!("agent-{:02}", i))))
    }

    #[test]
    fn test_rule_excluding_critical_agent_warns() {
        let config = InvocationConfig::new()
            .with_alias("T", ["type t"])
            .with_rule("T", AgentSelection::agents(["b"]));
        let plan = build_plan("please run type T", &config, &abc_roster());

        assert_eq!(plan.request_type, "T");
        assert_eq!(plan.agents_to_invoke, ids(&["b"]));
        assert!(!plan.critical_agents_included);
        assert_eq!(plan.missing_critical, ids(&["a"]));
        assert_eq!(plan.warnings, vec!["CRITICAL agents missing: a".to_string()]);
    }

    #[test]
    fn test_critical_included_iff_member() {
        let config = InvocationConfig::new()
            .with_alias("T", ["type t"])
            .with_rule("T", AgentSelection::agents(["b", "a"]));
        let plan = build_plan("type t", &config, &abc_roster());
        assert!(plan.critical_agents_included);
        assert!(plan.missing_critical.is_empty());
        assert_eq!(plan.included_critical().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_no_critical_list_means_included() {
        let roster = Roster::from_records([AgentRecord::new("x")]);
        let plan = build_plan("anything", &InvocationConfig::new(), &roster);
        assert!(plan.critical_agents_included);
    }

    #[test]
    fn test_estimates_use_configured_rates() {
        let config = InvocationConfig::new()
            .with_alias("T", ["type t"])
            .with_rule("T", AgentSelection::agents(["a", "b"]))
            .with_resources(ResourceRates {
                time_per_agent: 1.5,
                time_overhead: 3.0,
                cost_per_agent: 0.25,
            });
        let plan = build_plan("type t", &config, &abc_roster());
        assert_eq!(plan.estimated_time, 6.0);
        assert_eq!(plan.estimated_cost, 0.5);
    }

    #[test]
    fn test_default_estimates() {
        let plan = build_plan("zzz", &InvocationConfig::new(), &abc_roster());
        // fail-open selects a, b, c
        assert_eq!(plan.agent_count(), 3);
        assert_eq!(plan.estimated_time, 3.5);
        assert!((plan.estimated_cost - 0.3).abs() < 1e-9);
        assert!(plan.used_fallback);
    }

    #[test]
    fn test_confirmation_threshold_is_strict() {
        let roster = numbered_roster(10);
        let plan = build_plan("zzz", &InvocationConfig::new(), &roster);
        assert!(!plan.requires_confirmation);

        let roster = numbered_roster(11);
        let plan = build_plan("zzz", &InvocationConfig::new(), &roster);
        assert!(plan.requires_confirmation);
    }

    #[test]
    fn test_warning_order() {
        let roster = numbered_roster(30).with_critical_agents(["missing-chief"]);
        let config = InvocationConfig::new()
            .with_rule("whole_team", AgentSelection::All)
            .with_complete_group("g", CompleteGroup::new(["agent-00"], ["outside-expert"]));
        let plan = build_plan("whole team review", &config, &roster);

        assert_eq!(plan.request_type, "whole_team");
        assert_eq!(plan.agent_count(), 31);
        assert_eq!(
            plan.warnings,
            vec![
                "CRITICAL agents missing: missing-chief".to_string(),
                "Added for completeness: outside-expert".to_string(),
                "Large invocation: 31 agents will take ~17.5 minutes".to_string(),
            ]
        );
        assert!(plan.requires_confirmation);
    }

    #[test]
    fn test_dropped_rule_surfaces_as_warning() {
        let config = InvocationConfig::new().with_load_issues(vec![ConfigIssue::error(
            ConfigIssueCode::MalformedAgentList,
            "security_review",
            "`agents` must be a list or \"all\"",
        )]);
        let plan = build_plan("security check", &config, &abc_roster());

        assert_eq!(plan.request_type, "security_review");
        assert!(plan.used_fallback);
        assert_eq!(plan.agents_to_invoke, ids(&["a", "b", "c"]));
        assert_eq!(
            plan.warnings,
            vec![
                "Configuration entry 'security_review' was ignored: `agents` must be a list or \"all\""
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_request_text_preserved_verbatim() {
        let text = "  Review   EVERYTHING\n";
        let plan = build_plan(text, &InvocationConfig::new(), &abc_roster());
        assert_eq!(plan.request_text, text);
    }

    #[test]
    fn test_build_plan_is_deterministic() {
        let roster = numbered_roster(40).with_critical_agents(["agent-03", "agent-99"]);
        let config = InvocationConfig::new()
            .with_alias("whole_team", ["whole team"])
            .with_rule("whole_team", AgentSelection::All)
            .with_complete_group("g", CompleteGroup::new(["agent-01"], ["z", "y"]));

        let first = build_plan("Have the whole team review", &config, &roster);
        let second = build_plan("Have the whole team review", &config, &roster);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_check_critical_agents() {
        let (ok, missing) = check_critical_agents(&ids(&["a", "b"]), &ids(&["b", "c", "d"]));
        assert!(!ok);
        assert_eq!(missing, ids(&["c", "d"]));

        let (ok, missing) = check_critical_agents(&[], &[]);
        assert!(ok);
        assert!(missing.is_empty());
    }
}
