//! Agent discovery from a directory of markdown definitions.
//!
//! Every `*.md` file in the team directory is one agent unless its name
//! contains an excluded pattern. The file stem is the agent id.

use rollcall_application::ports::sources::{ConfigurationError, DocumentKind};
use rollcall_domain::AgentRecord;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FRONTMATTER_FENCE: &str = "---";

/// Scans a team directory for agent definitions.
#[derive(Debug, Clone)]
pub struct AgentDiscovery {
    team_dir: PathBuf,
    excluded_patterns: Vec<String>,
}

impl AgentDiscovery {
    pub fn new(team_dir: impl Into<PathBuf>) -> Self {
        Self {
            team_dir: team_dir.into(),
            excluded_patterns: Vec::new(),
        }
    }

    pub fn with_excluded_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn team_dir(&self) -> &Path {
        &self.team_dir
    }

    fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_patterns
            .iter()
            .any(|pattern| file_name.contains(pattern.as_str()))
    }

    /// Discover every agent, sorted by id.
    ///
    /// A definition that cannot be read becomes an invalid record; only a
    /// missing team directory is an error.
    pub fn discover(&self) -> Result<Vec<AgentRecord>, ConfigurationError> {
        if !self.team_dir.is_dir() {
            return Err(ConfigurationError::Missing {
                kind: DocumentKind::Roster,
                path: self.team_dir.clone(),
            });
        }

        let pattern = format!(
            "{}/*.md",
            glob::Pattern::escape(&self.team_dir.to_string_lossy())
        );
        let entries = glob::glob(&pattern).map_err(|e| ConfigurationError::Malformed {
            kind: DocumentKind::Roster,
            path: self.team_dir.clone(),
            reason: e.to_string(),
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable entry {}: {}", e.path().display(), e);
                    continue;
                }
            };
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.is_excluded(file_name) {
                debug!("Excluding {}", file_name);
                continue;
            }
            records.push(read_agent(&path));
        }

        records.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(
            "Found {} agent files in {}",
            records.len(),
            self.team_dir.display()
        );
        Ok(records)
    }
}

fn read_agent(path: &Path) -> AgentRecord {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source = path.display().to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Error processing {}: {}", id, e);
            return AgentRecord::invalid(id, e.to_string()).with_source_file(source);
        }
    };

    let metadata = extract_metadata(&content);
    let domain_group = string_field(&metadata, "domain_group");
    let priority = string_field(&metadata, "priority");

    let mut record = AgentRecord::new(id)
        .with_metadata(metadata)
        .with_source_file(source)
        .with_checksum(format!("{:x}", md5::compute(content.as_bytes())));
    if let Some(group) = domain_group {
        record = record.with_domain_group(group);
    }
    if let Some(priority) = priority {
        record = record.with_priority(priority);
    }
    record
}

fn string_field(metadata: &Map<String, Value>, key: &str) -> Option<String> {
    metadata.get(key)?.as_str().map(str::to_string)
}

/// Frontmatter metadata plus content flags.
///
/// YAML between a leading pair of `---` fences becomes the metadata map;
/// frontmatter that does not parse to a mapping is ignored. The
/// `has_expertise` and `has_critical_info` flags are set when the file
/// mentions those words anywhere.
pub fn extract_metadata(content: &str) -> Map<String, Value> {
    let mut metadata = Map::new();

    if let Some(rest) = content.strip_prefix(FRONTMATTER_FENCE) {
        let yaml = rest.split(FRONTMATTER_FENCE).next().unwrap_or_default();
        if let Ok(Some(parsed)) = serde_yaml::from_str::<Option<Map<String, Value>>>(yaml) {
            metadata = parsed;
        }
    }

    let lowered = content.to_lowercase();
    if lowered.contains("expertise") {
        metadata.insert("has_expertise".to_string(), Value::Bool(true));
    }
    if lowered.contains("critical") {
        metadata.insert("has_critical_info".to_string(), Value::Bool(true));
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDED_PATTERNS;

    fn write(dir: &Path, name: &str, content: &[u8]) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_discovers_and_excludes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "privacy-engineer.md", b"# Privacy Engineer\n");
        write(dir.path(), "ciso.md", b"# CISO\n");
        write(dir.path(), "template-agent.md", b"# Template\n");
        write(dir.path(), "README.md", b"# Team\n");
        write(dir.path(), "notes.txt", b"not an agent");

        let records = AgentDiscovery::new(dir.path())
            .with_excluded_patterns(DEFAULT_EXCLUDED_PATTERNS.iter().copied())
            .discover()
            .unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ciso", "privacy-engineer"]);
        assert_eq!(records[1].display_name, "Privacy Engineer");
        assert!(records.iter().all(|r| r.valid && r.checksum.is_some()));
    }

    #[test]
    fn test_frontmatter_fields() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "ciso.md",
            b"---\ndomain_group: security\npriority: critical\n---\n# CISO\nExpertise: risk\n",
        );

        let records = AgentDiscovery::new(dir.path()).discover().unwrap();
        let ciso = &records[0];
        assert_eq!(ciso.domain_group.as_deref(), Some("security"));
        assert_eq!(ciso.priority.as_deref(), Some("critical"));
        assert_eq!(ciso.metadata["has_expertise"], Value::Bool(true));
        assert_eq!(ciso.metadata["has_critical_info"], Value::Bool(true));
    }

    #[test]
    fn test_unreadable_definition_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.md", &[0xff, 0xfe, 0x00, 0x80]);

        let records = AgentDiscovery::new(dir.path()).discover().unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].valid);
        assert!(records[0].error.is_some());
        assert!(records[0].checksum.is_none());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let error = AgentDiscovery::new(dir.path().join("team"))
            .discover()
            .unwrap_err();
        assert!(error.is_missing());
        assert_eq!(error.kind(), DocumentKind::Roster);
    }

    #[test]
    fn test_extract_metadata_ignores_bad_frontmatter() {
        let metadata = extract_metadata("---\n: : [\n---\nplain body\n");
        assert!(metadata.is_empty());

        let metadata = extract_metadata("no frontmatter, just expertise");
        assert_eq!(metadata.len(), 1);
        assert!(metadata.contains_key("has_expertise"));
    }

    #[test]
    fn test_checksum_is_md5_of_content() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "cto.md", b"hello");

        let records = AgentDiscovery::new(dir.path()).discover().unwrap();
        assert_eq!(
            records[0].checksum.as_deref(),
            Some("5d41402abc4b2a76b9719d911017c592")
        );
    }
}
