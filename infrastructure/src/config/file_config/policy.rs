//! Planning policy from TOML (`[policy]` section)

use rollcall_domain::config::policy::{DEFAULT_COMPLETION_THRESHOLD, DEFAULT_LARGE_INVOCATION_ABOVE};
use rollcall_domain::{ConfigIssue, ConfigIssueCode, PlanningPolicy, SelectionFallback};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicyConfig {
    /// Minimum completion rate for a successful run (0.0-1.0)
    pub completion_threshold: f64,
    pub large_invocation_warning_above: usize,
    /// `entire_roster` or `critical_agents`
    pub unknown_request: SelectionFallback,
}

impl Default for FilePolicyConfig {
    fn default() -> Self {
        Self {
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            large_invocation_warning_above: DEFAULT_LARGE_INVOCATION_ABOVE,
            unknown_request: SelectionFallback::default(),
        }
    }
}

impl FilePolicyConfig {
    /// Convert to the domain policy. An out-of-range threshold falls back
    /// to the default and is reported.
    pub fn to_policy(&self) -> (PlanningPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut completion_threshold = self.completion_threshold;
        if !(0.0..=1.0).contains(&completion_threshold) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidRate,
                "policy.completion_threshold",
                format!(
                    "{} is outside 0.0-1.0, using {}",
                    completion_threshold, DEFAULT_COMPLETION_THRESHOLD
                ),
            ));
            completion_threshold = DEFAULT_COMPLETION_THRESHOLD;
        }

        let policy = PlanningPolicy {
            completion_threshold,
            large_invocation_above: self.large_invocation_warning_above,
            unknown_request: self.unknown_request,
        };
        (policy, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_toml() {
        let toml_str = r#"
[policy]
completion_threshold = 0.75
unknown_request = "critical_agents"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let (policy, issues) = config.policy.to_policy();
        assert!(issues.is_empty());
        assert_eq!(policy.completion_threshold, 0.75);
        assert_eq!(policy.large_invocation_above, 25);
        assert_eq!(policy.unknown_request, SelectionFallback::CriticalAgents);
    }

    #[test]
    fn test_out_of_range_threshold() {
        let config = FilePolicyConfig {
            completion_threshold: 90.0,
            ..Default::default()
        };
        let (policy, issues) = config.to_policy();
        assert_eq!(policy.completion_threshold, 0.90);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].subject, "policy.completion_threshold");
    }
}
