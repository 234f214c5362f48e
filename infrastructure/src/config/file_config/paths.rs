//! File locations from TOML (`[paths]` section)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw path configuration from TOML
///
/// Relative paths are resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// Directory holding one `*.md` definition per agent
    pub team_dir: PathBuf,
    /// Team manifest (JSON)
    pub manifest: PathBuf,
    /// Orchestration configuration (YAML)
    pub orchestration: PathBuf,
    /// Directory for the invocation audit log and log files
    pub log_dir: PathBuf,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        Self {
            team_dir: PathBuf::from("team"),
            manifest: PathBuf::from("orch-team-manifest.json"),
            orchestration: PathBuf::from("orch-config.yaml"),
            log_dir: PathBuf::from("logs/invocations"),
        }
    }
}

impl FilePathsConfig {
    /// Audit log file inside `log_dir`.
    pub fn audit_log(&self) -> PathBuf {
        self.log_dir.join("invocations.jsonl")
    }

    /// Discovery cache, written next to the team directory.
    pub fn discovery_cache(&self) -> PathBuf {
        let parent = self
            .team_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        parent.join(".agent_discovery_cache.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let paths = FilePathsConfig::default();
        assert_eq!(paths.team_dir, PathBuf::from("team"));
        assert_eq!(
            paths.audit_log(),
            PathBuf::from("logs/invocations/invocations.jsonl")
        );
    }

    #[test]
    fn test_discovery_cache_sits_beside_team_dir() {
        let paths = FilePathsConfig {
            team_dir: PathBuf::from("orchestration/team"),
            ..Default::default()
        };
        assert_eq!(
            paths.discovery_cache(),
            PathBuf::from("orchestration/.agent_discovery_cache.json")
        );
        assert_eq!(
            FilePathsConfig::default().discovery_cache(),
            PathBuf::from("./.agent_discovery_cache.json")
        );
    }
}
