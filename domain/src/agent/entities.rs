//! Agent roster entities.
//!
//! An [`AgentRecord`] describes one independently invocable reviewer/worker
//! unit. Records are created once per roster load and never mutated by the
//! planning core.

use crate::core::string::title_case_slug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single agent known to the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Unique, stable identifier (e.g. `security-architect`)
    pub id: String,
    /// Human-readable name shown in reports
    pub display_name: String,
    /// Whether the agent definition could be loaded
    pub valid: bool,
    /// Free-form metadata (usually parsed from definition frontmatter)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    /// Domain group this agent belongs to, if declared on the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_group: Option<String>,
    /// Priority tag (e.g. `high`), if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Definition file the record was discovered from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Content checksum of the definition file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Load error for invalid records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentRecord {
    /// Creates a valid record whose display name is derived from the identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: title_case_slug(&id),
            id,
            valid: true,
            metadata: Map::new(),
            domain_group: None,
            priority: None,
            source_file: None,
            checksum: None,
            error: None,
        }
    }

    /// Creates an invalid record carrying the reason it could not be loaded.
    pub fn invalid(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            ..Self::new(id)
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_domain_group(mut self, group: impl Into<String>) -> Self {
        self.domain_group = Some(group.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_source_file(mut self, path: impl Into<String>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    /// Priority label for display, `unknown` when not declared.
    pub fn priority_label(&self) -> &str {
        self.priority.as_deref().unwrap_or("unknown")
    }
}
