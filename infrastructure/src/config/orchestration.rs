//! Orchestration configuration loader (`orch-config.yaml`)
//!
//! The YAML document is read into loosely typed raw structs first so that a
//! single malformed rule costs only that rule. Conversion into the domain
//! [`InvocationConfig`] drops unusable entries and records a
//! [`ConfigIssue`] for each one.
//!
//! Maps are read into [`IndexMap`]s: alias order is significant, since the
//! first alias whose phrase matches wins.

use indexmap::IndexMap;
use rollcall_application::ports::sources::{
    ConfigurationError, DocumentKind, InvocationConfigSource,
};
use rollcall_domain::config::ALL_AGENTS_MARKER;
use rollcall_domain::{
    AgentSelection, CompleteGroup, ConfigIssue, ConfigIssueCode, InvocationConfig, InvocationRule,
    PlanningPolicy, Preset, ResourceRates, SafetyChecks,
};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOrchestration {
    invocation_rules: IndexMap<String, RawRule>,
    presets: IndexMap<String, RawRule>,
    invocation_aliases: IndexMap<String, Value>,
    safety_checks: RawSafetyChecks,
    resource_management: RawResources,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRule {
    agents: Option<Value>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSafetyChecks {
    complete_groups: IndexMap<String, RawCompleteGroup>,
    require_confirmation_above: Option<Value>,
    require_double_confirmation_above: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompleteGroup {
    trigger_agents: Option<Value>,
    must_include: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResources {
    time_per_agent: Option<Value>,
    time_overhead: Option<Value>,
    estimated_cost_per_agent: Option<Value>,
}

/// Reads a string list, or `None` if the value is anything else.
fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_sequence()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// An absent field reads as an empty list; a present one must be a string list.
fn optional_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(value) => string_list(value),
    }
}

fn agent_selection(value: Option<&Value>) -> Option<AgentSelection> {
    if let Some(value) = value
        && value.as_str() == Some(ALL_AGENTS_MARKER)
    {
        return Some(AgentSelection::All);
    }
    optional_list(value).map(AgentSelection::Agents)
}

/// Reads an optional threshold, falling back to `default` with an issue when malformed.
fn threshold(
    value: Option<&Value>,
    field: &str,
    default: usize,
    issues: &mut Vec<ConfigIssue>,
) -> usize {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return default;
    };
    match value.as_u64().and_then(|n| usize::try_from(n).ok()) {
        Some(n) => n,
        None => {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MalformedThreshold,
                format!("safety_checks.{}", field),
                format!("expected a non-negative integer; using {}", default),
            ));
            default
        }
    }
}

/// Reads an optional rate, falling back to `default` with an issue when not a number.
fn rate(
    value: Option<&Value>,
    field: &str,
    default: f64,
    issues: &mut Vec<ConfigIssue>,
) -> f64 {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return default;
    };
    match value.as_f64() {
        Some(rate) => rate,
        None => {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidRate,
                format!("resource_management.{}", field),
                format!("expected a number; using {}", default),
            ));
            default
        }
    }
}

fn malformed_agents(subject: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::MalformedAgentList,
        subject,
        format!("`agents` must be a list of agent ids or \"{}\"", ALL_AGENTS_MARKER),
    )
}

impl RawOrchestration {
    fn into_config(self, policy: PlanningPolicy) -> InvocationConfig {
        let mut issues = Vec::new();

        let mut invocation_rules = IndexMap::new();
        for (name, raw) in self.invocation_rules {
            match agent_selection(raw.agents.as_ref()) {
                Some(agents) => {
                    invocation_rules.insert(
                        name,
                        InvocationRule {
                            agents,
                            description: raw.description,
                        },
                    );
                }
                None => issues.push(malformed_agents(&name)),
            }
        }

        let mut presets = IndexMap::new();
        for (name, raw) in self.presets {
            match optional_list(raw.agents.as_ref()) {
                Some(agents) => {
                    presets.insert(
                        name,
                        Preset {
                            agents,
                            description: raw.description,
                        },
                    );
                }
                None => issues.push(malformed_agents(&name)),
            }
        }

        let mut invocation_aliases = IndexMap::new();
        for (request_type, value) in self.invocation_aliases {
            let phrases = match &value {
                Value::String(phrase) => Some(vec![phrase.clone()]),
                other => string_list(other),
            };
            let Some(phrases) = phrases else {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MalformedAlias,
                    request_type.as_str(),
                    "alias must be a phrase or a list of phrases",
                ));
                continue;
            };
            if phrases.iter().any(|phrase| phrase.trim().is_empty()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyAliasPhrase,
                    request_type.as_str(),
                    "empty alias phrase ignored",
                ));
            }
            invocation_aliases.insert(request_type, phrases);
        }

        let mut complete_groups = IndexMap::new();
        for (name, raw) in self.safety_checks.complete_groups {
            let trigger_agents = optional_list(raw.trigger_agents.as_ref());
            let must_include = optional_list(raw.must_include.as_ref());
            match (trigger_agents, must_include) {
                (Some(trigger_agents), Some(must_include)) => {
                    complete_groups.insert(name, CompleteGroup::new(trigger_agents, must_include));
                }
                _ => issues.push(ConfigIssue::error(
                    ConfigIssueCode::MalformedCompleteGroup,
                    format!("complete_groups.{}", name),
                    "`trigger_agents` and `must_include` must be lists of agent ids",
                )),
            }
        }

        let defaults = SafetyChecks::default();
        let safety_checks = SafetyChecks {
            complete_groups,
            require_confirmation_above: threshold(
                self.safety_checks.require_confirmation_above.as_ref(),
                "require_confirmation_above",
                defaults.require_confirmation_above,
                &mut issues,
            ),
            require_double_confirmation_above: threshold(
                self.safety_checks.require_double_confirmation_above.as_ref(),
                "require_double_confirmation_above",
                defaults.require_double_confirmation_above,
                &mut issues,
            ),
        };

        let rates = ResourceRates::default();
        let raw_rates = &self.resource_management;
        let resources = ResourceRates {
            time_per_agent: rate(
                raw_rates.time_per_agent.as_ref(),
                "time_per_agent",
                rates.time_per_agent,
                &mut issues,
            ),
            time_overhead: rate(
                raw_rates.time_overhead.as_ref(),
                "time_overhead",
                rates.time_overhead,
                &mut issues,
            ),
            cost_per_agent: rate(
                raw_rates.estimated_cost_per_agent.as_ref(),
                "estimated_cost_per_agent",
                rates.cost_per_agent,
                &mut issues,
            ),
        };

        InvocationConfig {
            invocation_rules,
            presets,
            invocation_aliases,
            safety_checks,
            resources,
            policy,
            load_issues: issues,
        }
    }
}

/// Parse an orchestration document from a string.
pub fn parse_orchestration(
    content: &str,
    policy: PlanningPolicy,
) -> Result<InvocationConfig, serde_yaml::Error> {
    let raw: RawOrchestration = if content.trim().is_empty() {
        RawOrchestration::default()
    } else {
        serde_yaml::from_str(content)?
    };
    Ok(raw.into_config(policy))
}

/// Loads the orchestration configuration from a YAML file.
pub struct YamlInvocationConfigSource {
    path: PathBuf,
    policy: PlanningPolicy,
}

impl YamlInvocationConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: PlanningPolicy::default(),
        }
    }

    /// Planning policy comes from the application settings, not the YAML.
    pub fn with_policy(mut self, policy: PlanningPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationConfigSource for YamlInvocationConfigSource {
    fn load_config(&self) -> Result<InvocationConfig, ConfigurationError> {
        let kind = DocumentKind::Orchestration;
        if !self.path.exists() {
            return Err(ConfigurationError::Missing {
                kind,
                path: self.path.clone(),
            });
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            ConfigurationError::Io {
                kind,
                path: self.path.clone(),
                source,
            }
        })?;

        let config = parse_orchestration(&content, self.policy).map_err(|e| {
            ConfigurationError::Malformed {
                kind,
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!(
            "Loaded {} rules, {} presets, {} aliases from {}",
            config.invocation_rules.len(),
            config.presets.len(),
            config.invocation_aliases.len(),
            self.path.display()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_domain::Severity;

    const SAMPLE: &str = r#"
invocation_rules:
  whole_team:
    agents: all
    description: Every agent on the roster
  security_review:
    agents: [ciso, security-architect]
  broken:
    agents: {ciso: true}

presets:
  leadership:
    agents: [ceo, cto]

invocation_aliases:
  whole_team: ["whole team", "everyone"]
  security_review: "security audit"

safety_checks:
  complete_groups:
    security:
      trigger_agents: [ciso]
      must_include: [privacy-engineer]
  require_confirmation_above: 5

resource_management:
  time_per_agent: 1
  estimated_cost_per_agent: 0.25
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_orchestration(SAMPLE, PlanningPolicy::default()).unwrap();

        assert_eq!(config.invocation_rules["whole_team"].agents, AgentSelection::All);
        assert_eq!(
            config.invocation_rules["security_review"].agents,
            AgentSelection::agents(["ciso", "security-architect"])
        );
        assert_eq!(config.presets["leadership"].agents, vec!["ceo", "cto"]);
        assert_eq!(
            config.invocation_aliases["security_review"],
            vec!["security audit"]
        );
        assert_eq!(config.safety_checks.require_confirmation_above, 5);
        assert_eq!(config.safety_checks.require_double_confirmation_above, 25);
        assert_eq!(config.resources.time_per_agent, 1.0);
        assert_eq!(config.resources.time_overhead, 2.0);
        assert_eq!(config.resources.cost_per_agent, 0.25);
    }

    #[test]
    fn test_malformed_rule_is_dropped_and_recorded() {
        let config = parse_orchestration(SAMPLE, PlanningPolicy::default()).unwrap();

        assert!(!config.invocation_rules.contains_key("broken"));
        assert_eq!(config.load_issues.len(), 1);
        assert_eq!(config.load_issues[0].code, ConfigIssueCode::MalformedAgentList);
        assert_eq!(config.load_issues[0].severity, Severity::Error);
        assert_eq!(config.issues_for("broken").count(), 1);
    }

    #[test]
    fn test_rule_without_agents_selects_nobody() {
        let yaml = "invocation_rules:\n  t:\n    description: x\npresets:\n  p: {}\n";
        let config = parse_orchestration(yaml, PlanningPolicy::default()).unwrap();

        assert_eq!(config.invocation_rules["t"].agents, AgentSelection::Agents(vec![]));
        assert_eq!(config.invocation_rules["t"].description.as_deref(), Some("x"));
        assert!(config.presets["p"].agents.is_empty());
        assert!(config.load_issues.is_empty());
    }

    #[test]
    fn test_malformed_group_is_dropped_and_rest_of_document_kept() {
        let yaml = r#"
invocation_rules:
  t:
    agents: [ciso]
safety_checks:
  complete_groups:
    g:
      trigger_agents: ciso
      must_include: [privacy-engineer]
    ok:
      trigger_agents: [ciso]
      must_include: [security-architect]
"#;
        let config = parse_orchestration(yaml, PlanningPolicy::default()).unwrap();

        assert_eq!(config.invocation_rules["t"].agents, AgentSelection::agents(["ciso"]));
        assert!(!config.safety_checks.complete_groups.contains_key("g"));
        assert!(config.safety_checks.complete_groups.contains_key("ok"));
        assert_eq!(config.load_issues.len(), 1);
        assert_eq!(config.load_issues[0].code, ConfigIssueCode::MalformedCompleteGroup);
        assert_eq!(config.load_issues[0].subject, "complete_groups.g");
    }

    #[test]
    fn test_malformed_threshold_falls_back_to_default() {
        let yaml = "safety_checks:\n  require_confirmation_above: lots\n  \
                    require_double_confirmation_above: 40\n";
        let config = parse_orchestration(yaml, PlanningPolicy::default()).unwrap();

        assert_eq!(config.safety_checks.require_confirmation_above, 10);
        assert_eq!(config.safety_checks.require_double_confirmation_above, 40);
        assert_eq!(config.load_issues.len(), 1);
        assert_eq!(config.load_issues[0].code, ConfigIssueCode::MalformedThreshold);
        assert_eq!(
            config.load_issues[0].subject,
            "safety_checks.require_confirmation_above"
        );
    }

    #[test]
    fn test_non_numeric_rate_falls_back_to_default() {
        let yaml = "resource_management:\n  time_per_agent: slow\n  time_overhead: 3\n";
        let config = parse_orchestration(yaml, PlanningPolicy::default()).unwrap();

        assert_eq!(config.resources.time_per_agent, 0.5);
        assert_eq!(config.resources.time_overhead, 3.0);
        assert_eq!(config.load_issues[0].code, ConfigIssueCode::InvalidRate);
    }

    #[test]
    fn test_alias_order_is_preserved() {
        let yaml = "invocation_aliases:\n  zeta: team\n  alpha: whole team\n";
        let config = parse_orchestration(yaml, PlanningPolicy::default()).unwrap();
        let order: Vec<&str> = config.invocation_aliases.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_empty_alias_phrase_warns() {
        let yaml = "invocation_aliases:\n  whole_team: [\"\", everyone]\n";
        let config = parse_orchestration(yaml, PlanningPolicy::default()).unwrap();
        assert_eq!(config.load_issues[0].code, ConfigIssueCode::EmptyAliasPhrase);
        assert_eq!(config.invocation_aliases["whole_team"].len(), 2);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_orchestration("", PlanningPolicy::default()).unwrap();
        assert!(config.invocation_rules.is_empty());
        assert_eq!(config.safety_checks.require_confirmation_above, 10);
    }

    #[test]
    fn test_source_reports_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();

        let missing = YamlInvocationConfigSource::new(dir.path().join("absent.yaml"));
        assert!(missing.load_config().unwrap_err().is_missing());

        let path = dir.path().join("orch-config.yaml");
        std::fs::write(&path, "invocation_rules: 42\n").unwrap();
        let error = YamlInvocationConfigSource::new(&path)
            .load_config()
            .unwrap_err();
        assert!(matches!(error, ConfigurationError::Malformed { .. }));
    }

    #[test]
    fn test_source_applies_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orch-config.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let policy = PlanningPolicy {
            completion_threshold: 0.5,
            ..Default::default()
        };
        let config = YamlInvocationConfigSource::new(&path)
            .with_policy(policy)
            .load_config()
            .unwrap();
        assert_eq!(config.policy.completion_threshold, 0.5);
    }
}
