//! Team manifest (`orch-team-manifest.json`)

use indexmap::IndexMap;
use rollcall_application::ports::sources::{ConfigurationError, DocumentKind, RosterSource};
use rollcall_domain::{AgentRecord, Roster};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The manifest document as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamManifest {
    pub total_agents: Option<usize>,
    pub agents: IndexMap<String, ManifestAgent>,
    pub validation: ManifestValidation,
    pub domain_groups: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestAgent {
    pub name: Option<String>,
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub domain_group: Option<String>,
    pub priority: Option<String>,
    pub file: Option<String>,
    pub error: Option<String>,
}

fn default_valid() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifestValidation {
    pub critical_agents_always_include: Vec<String>,
}

impl ManifestAgent {
    fn to_record(&self, id: &str) -> AgentRecord {
        let mut record = AgentRecord::new(id).with_metadata(self.metadata.clone());
        record.valid = self.valid;
        record.error = self.error.clone();
        if let Some(name) = &self.name {
            record = record.with_display_name(name.as_str());
        }
        if let Some(group) = &self.domain_group {
            record = record.with_domain_group(group.as_str());
        }
        if let Some(priority) = &self.priority {
            record = record.with_priority(priority.as_str());
        }
        if let Some(file) = &self.file {
            record = record.with_source_file(file.as_str());
        }
        record
    }
}

impl TeamManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let kind = DocumentKind::Manifest;
        if !path.exists() {
            return Err(ConfigurationError::Missing {
                kind,
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            kind,
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigurationError::Malformed {
            kind,
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn critical_agents(&self) -> &[String] {
        &self.validation.critical_agents_always_include
    }

    /// Roster built from the manifest's own agent table.
    pub fn to_roster(&self) -> Roster {
        let records = self.agents.iter().map(|(id, agent)| agent.to_record(id));
        self.apply_to(Roster::from_records(records))
    }

    /// Copy critical list, domain groups and declared total onto `roster`.
    pub fn apply_to(&self, roster: Roster) -> Roster {
        let mut roster = roster.with_critical_agents(self.critical_agents().iter().cloned());
        for (name, members) in &self.domain_groups {
            roster = roster.with_domain_group(name.as_str(), members.iter().cloned());
        }
        if let Some(total) = self.total_agents {
            roster = roster.with_expected_total(total);
        }
        roster
    }

    /// Manifest entry for `id`, used to fill in group and priority for
    /// discovered agents whose definitions do not declare them.
    pub fn agent(&self, id: &str) -> Option<&ManifestAgent> {
        self.agents.get(id)
    }
}

/// Roster source backed by the manifest alone.
pub struct ManifestRosterSource {
    path: PathBuf,
}

impl ManifestRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for ManifestRosterSource {
    fn load_roster(&self) -> Result<Roster, ConfigurationError> {
        let manifest = TeamManifest::load(&self.path)?;
        debug!(
            "Manifest {} lists {} agents",
            self.path.display(),
            manifest.agents.len()
        );
        Ok(manifest.to_roster())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "total_agents": 3,
  "agents": {
    "ciso": {"name": "CISO", "domain_group": "security", "priority": "critical"},
    "cto": {"name": "CTO", "domain_group": "leadership", "priority": "high"},
    "draft-agent": {"valid": false, "error": "missing role section"}
  },
  "validation": {"critical_agents_always_include": ["ciso", "privacy-engineer"]},
  "domain_groups": {"security": ["ciso"], "leadership": ["cto"]}
}"#;

    #[test]
    fn test_manifest_roster() {
        let manifest: TeamManifest = serde_json::from_str(SAMPLE).unwrap();
        let roster = manifest.to_roster();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.display_name("ciso"), "CISO");
        assert_eq!(roster.priority_label("cto"), "high");
        assert!(!roster.get("draft-agent").unwrap().valid);
        assert_eq!(roster.critical_agents(), ["ciso", "privacy-engineer"]);
        assert_eq!(roster.expected_total(), Some(3));
        assert_eq!(roster.missing_critical(), vec!["privacy-engineer"]);
    }

    #[test]
    fn test_domain_group_order_is_kept() {
        let manifest: TeamManifest = serde_json::from_str(SAMPLE).unwrap();
        let groups: Vec<String> = manifest.to_roster().domain_groups().into_keys().collect();
        assert_eq!(groups, vec!["security", "leadership"]);
    }

    #[test]
    fn test_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orch-team-manifest.json");

        let error = ManifestRosterSource::new(&path).load_roster().unwrap_err();
        assert!(error.is_missing());

        std::fs::write(&path, "{ not json").unwrap();
        let error = ManifestRosterSource::new(&path).load_roster().unwrap_err();
        assert!(matches!(error, ConfigurationError::Malformed { .. }));
        assert_eq!(error.kind(), DocumentKind::Manifest);
    }
}
