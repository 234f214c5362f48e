//! Agent discovery configuration from TOML (`[discovery]` section)

use serde::{Deserialize, Serialize};

/// Filename fragments that mark a definition file as not-an-agent.
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &["rca-", "template-", "README", "test-", "draft-"];

/// Critical agents assumed when no manifest supplies a list.
pub const DEFAULT_FALLBACK_CRITICAL_AGENTS: &[&str] = &[
    "ai-safety-engineer",
    "privacy-engineer",
    "ciso",
    "security-architect",
    "business-analyst",
    "project-manager",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscoveryConfig {
    pub excluded_patterns: Vec<String>,
    pub fallback_critical_agents: Vec<String>,
}

impl Default for FileDiscoveryConfig {
    fn default() -> Self {
        Self {
            excluded_patterns: DEFAULT_EXCLUDED_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_critical_agents: DEFAULT_FALLBACK_CRITICAL_AGENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_replaces_list() {
        let toml_str = r#"
[discovery]
excluded_patterns = ["wip-"]
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discovery.excluded_patterns, vec!["wip-"]);
        assert_eq!(config.discovery.fallback_critical_agents.len(), 6);
    }
}
