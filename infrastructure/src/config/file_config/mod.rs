//! Raw TOML settings types
//!
//! These structs mirror `rollcall.toml` exactly and use domain types where
//! appropriate.

mod discovery;
mod paths;
mod policy;

pub use discovery::{DEFAULT_EXCLUDED_PATTERNS, DEFAULT_FALLBACK_CRITICAL_AGENTS, FileDiscoveryConfig};
pub use paths::FilePathsConfig;
pub use policy::FilePolicyConfig;

use rollcall_domain::{ConfigIssue, OutputFormat, PlanningPolicy};
use serde::{Deserialize, Serialize};

/// Complete settings file (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub paths: FilePathsConfig,
    pub discovery: FileDiscoveryConfig,
    pub policy: FilePolicyConfig,
    pub output: FileOutputConfig,
}

/// `[output]`: how plans and results are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Used when `--output` is not given
    pub format: Option<OutputFormat>,
    pub color: bool,
    /// List planned agents under their domain groups rather than as one list
    pub group_by_domain: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            group_by_domain: true,
        }
    }
}

impl FileConfig {
    /// The planning policy, with any issues found converting it.
    pub fn planning_policy(&self) -> (PlanningPolicy, Vec<ConfigIssue>) {
        self.policy.to_policy()
    }

    /// Validate the settings, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.planning_policy().1
    }
}
