//! Typed orchestration configuration.
//!
//! [`InvocationConfig`] is the validated, in-memory form of the
//! orchestration document. It is built once at load time; every optional
//! field has a fixed default so the planning core never checks for
//! missing keys.
//!
//! ```text
//! invocation_rules:     request type -> { agents: [..] | "all" }
//! presets:              name -> { agents: [..] }
//! invocation_aliases:   request type -> phrase | [phrases]   (declared order)
//! safety_checks:
//!   complete_groups:    name -> { trigger_agents, must_include }
//!   require_confirmation_above / require_double_confirmation_above
//! resource_management:  time_per_agent, time_overhead, estimated_cost_per_agent
//! ```

use super::policy::PlanningPolicy;
use super::validation::{ConfigIssue, ConfigIssueCode};
use crate::agent::Roster;
use indexmap::IndexMap;
use serde::Serializer;
use serde::Serialize;

/// Marker string meaning "every agent in the roster".
pub const ALL_AGENTS_MARKER: &str = "all";

/// Default estimated minutes per agent.
pub const DEFAULT_TIME_PER_AGENT: f64 = 0.5;
/// Default fixed overhead in minutes per invocation.
pub const DEFAULT_TIME_OVERHEAD: f64 = 2.0;
/// Default estimated cost per agent.
pub const DEFAULT_COST_PER_AGENT: f64 = 0.10;
/// Default agent count above which confirmation is required.
pub const DEFAULT_CONFIRM_ABOVE: usize = 10;
/// Default agent count above which double confirmation is required.
pub const DEFAULT_DOUBLE_CONFIRM_ABOVE: usize = 25;

/// Which agents a rule selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentSelection {
    /// Every agent in the roster, valid or not
    All,
    /// An explicit list, trusted verbatim and kept in configured order
    Agents(Vec<String>),
}

impl AgentSelection {
    pub fn agents<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AgentSelection::Agents(ids.into_iter().map(Into::into).collect())
    }

    /// Resolve against a roster.
    pub fn resolve(&self, roster: &Roster) -> Vec<String> {
        match self {
            AgentSelection::All => roster.ids().map(str::to_string).collect(),
            AgentSelection::Agents(ids) => ids.clone(),
        }
    }
}

impl Serialize for AgentSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AgentSelection::All => serializer.serialize_str(ALL_AGENTS_MARKER),
            AgentSelection::Agents(ids) => ids.serialize(serializer),
        }
    }
}

/// Agent selection rule for one request type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationRule {
    pub agents: AgentSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InvocationRule {
    pub fn new(agents: AgentSelection) -> Self {
        Self {
            agents,
            description: None,
        }
    }
}

/// Named agent preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub agents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// If any trigger agent is selected, every `must_include` agent must be too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompleteGroup {
    pub trigger_agents: Vec<String>,
    pub must_include: Vec<String>,
}

impl CompleteGroup {
    pub fn new<I, J, S, T>(trigger_agents: I, must_include: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            trigger_agents: trigger_agents.into_iter().map(Into::into).collect(),
            must_include: must_include.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any trigger agent is among `selected`.
    pub fn is_triggered_by(&self, selected: &[String]) -> bool {
        self.trigger_agents
            .iter()
            .any(|trigger| selected.contains(trigger))
    }
}

/// Safety thresholds and group completeness rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyChecks {
    pub complete_groups: IndexMap<String, CompleteGroup>,
    pub require_confirmation_above: usize,
    pub require_double_confirmation_above: usize,
}

impl Default for SafetyChecks {
    fn default() -> Self {
        Self {
            complete_groups: IndexMap::new(),
            require_confirmation_above: DEFAULT_CONFIRM_ABOVE,
            require_double_confirmation_above: DEFAULT_DOUBLE_CONFIRM_ABOVE,
        }
    }
}

/// Time and cost estimate for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceEstimate {
    /// Minutes
    pub time: f64,
    pub cost: f64,
}

/// Per-agent resource rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceRates {
    pub time_per_agent: f64,
    pub time_overhead: f64,
    pub cost_per_agent: f64,
}

impl Default for ResourceRates {
    fn default() -> Self {
        Self {
            time_per_agent: DEFAULT_TIME_PER_AGENT,
            time_overhead: DEFAULT_TIME_OVERHEAD,
            cost_per_agent: DEFAULT_COST_PER_AGENT,
        }
    }
}

impl ResourceRates {
    /// `time = count * time_per_agent + overhead`, `cost = count * cost_per_agent`
    pub fn estimate(&self, agent_count: usize) -> ResourceEstimate {
        let count = agent_count as f64;
        ResourceEstimate {
            time: count * self.time_per_agent + self.time_overhead,
            cost: count * self.cost_per_agent,
        }
    }

    /// Cost of the agents that actually ran.
    pub fn cost_of(&self, agent_count: usize) -> f64 {
        agent_count as f64 * self.cost_per_agent
    }
}

/// The validated orchestration configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvocationConfig {
    pub invocation_rules: IndexMap<String, InvocationRule>,
    pub presets: IndexMap<String, Preset>,
    /// Request type -> trigger phrases, in declared order (first match wins)
    pub invocation_aliases: IndexMap<String, Vec<String>>,
    pub safety_checks: SafetyChecks,
    pub resources: ResourceRates,
    pub policy: PlanningPolicy,
    /// Problems found while loading; the affected entries were dropped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_issues: Vec<ConfigIssue>,
}

impl InvocationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, request_type: impl Into<String>, agents: AgentSelection) -> Self {
        self.invocation_rules
            .insert(request_type.into(), InvocationRule::new(agents));
        self
    }

    pub fn with_preset<I, S>(mut self, name: impl Into<String>, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presets.insert(
            name.into(),
            Preset {
                agents: agents.into_iter().map(Into::into).collect(),
                description: None,
            },
        );
        self
    }

    pub fn with_alias<I, S>(mut self, request_type: impl Into<String>, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invocation_aliases.insert(
            request_type.into(),
            phrases.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_complete_group(mut self, name: impl Into<String>, group: CompleteGroup) -> Self {
        self.safety_checks
            .complete_groups
            .insert(name.into(), group);
        self
    }

    pub fn with_confirmation_thresholds(mut self, single: usize, double: usize) -> Self {
        self.safety_checks.require_confirmation_above = single;
        self.safety_checks.require_double_confirmation_above = double;
        self
    }

    pub fn with_resources(mut self, resources: ResourceRates) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_policy(mut self, policy: PlanningPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_load_issues(mut self, issues: Vec<ConfigIssue>) -> Self {
        self.load_issues = issues;
        self
    }

    /// Load issues recorded against a particular rule or preset name.
    pub fn issues_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a ConfigIssue> {
        self.load_issues
            .iter()
            .filter(move |issue| issue.subject == subject)
    }

    /// Self-consistency checks that need no roster.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let safety = &self.safety_checks;

        if safety.require_double_confirmation_above < safety.require_confirmation_above {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvertedConfirmationThresholds,
                "safety_checks",
                format!(
                    "require_double_confirmation_above ({}) is below require_confirmation_above ({})",
                    safety.require_double_confirmation_above, safety.require_confirmation_above
                ),
            ));
        }

        for (name, group) in &safety.complete_groups {
            if group.trigger_agents.is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyTriggerSet,
                    format!("complete_groups.{}", name),
                    "no trigger_agents; the group can never apply",
                ));
            }
        }

        let rates = [
            ("time_per_agent", self.resources.time_per_agent),
            ("time_overhead", self.resources.time_overhead),
            ("estimated_cost_per_agent", self.resources.cost_per_agent),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidRate,
                    format!("resource_management.{}", field),
                    format!("{} is not a non-negative number", value),
                ));
            }
        }

        issues
    }

    /// Report rules, presets and groups that name agents the roster does not know.
    pub fn validate_references(&self, roster: &Roster) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut check = |subject: String, ids: &[String]| {
            let unknown: Vec<&str> = ids
                .iter()
                .filter(|id| !roster.contains(id))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownAgent,
                    subject,
                    format!("unknown agents: {}", unknown.join(", ")),
                ));
            }
        };

        for (name, rule) in &self.invocation_rules {
            if let AgentSelection::Agents(ids) = &rule.agents {
                check(name.clone(), ids);
            }
        }
        for (name, preset) in &self.presets {
            check(name.clone(), &preset.agents);
        }
        for (name, group) in &self.safety_checks.complete_groups {
            let ids: Vec<String> = group
                .trigger_agents
                .iter()
                .chain(&group.must_include)
                .cloned()
                .collect();
            check(format!("complete_groups.{}", name), &ids);
        }

        issues
    }
}
