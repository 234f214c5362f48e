//! Ports for loading the roster and the orchestration configuration.
//!
//! Both documents are owned by the surrounding application. Adapters load
//! them once per session; the planning core only ever sees the resulting
//! immutable snapshots.

use rollcall_domain::{InvocationConfig, Roster};
use std::path::PathBuf;
use thiserror::Error;

/// Which document failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Roster,
    Manifest,
    Orchestration,
    Settings,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DocumentKind::Roster => "agent roster",
            DocumentKind::Manifest => "team manifest",
            DocumentKind::Orchestration => "orchestration config",
            DocumentKind::Settings => "settings",
        };
        write!(f, "{}", label)
    }
}

/// Fatal loading errors. No planning happens after one of these.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{kind} not found: {}", .path.display())]
    Missing { kind: DocumentKind, path: PathBuf },

    #[error("{kind} at {} is malformed: {reason}", .path.display())]
    Malformed {
        kind: DocumentKind,
        path: PathBuf,
        reason: String,
    },

    #[error("could not read {kind} at {}: {source}", .path.display())]
    Io {
        kind: DocumentKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigurationError {
    pub fn kind(&self) -> DocumentKind {
        match self {
            ConfigurationError::Missing { kind, .. }
            | ConfigurationError::Malformed { kind, .. }
            | ConfigurationError::Io { kind, .. } => *kind,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigurationError::Missing { .. })
    }
}

/// Port for loading the agent roster.
pub trait RosterSource: Send + Sync {
    fn load_roster(&self) -> Result<Roster, ConfigurationError>;
}

/// Port for loading the orchestration configuration.
///
/// Implementations validate once at load time: malformed entries are dropped
/// and recorded in [`InvocationConfig::load_issues`], only an unreadable or
/// unparseable document is an error.
pub trait InvocationConfigSource: Send + Sync {
    fn load_config(&self) -> Result<InvocationConfig, ConfigurationError>;
}

/// In-memory roster source for tests and embedding.
pub struct StaticRoster(pub Roster);

impl RosterSource for StaticRoster {
    fn load_roster(&self) -> Result<Roster, ConfigurationError> {
        Ok(self.0.clone())
    }
}

/// In-memory configuration source for tests and embedding.
pub struct StaticConfig(pub InvocationConfig);

impl InvocationConfigSource for StaticConfig {
    fn load_config(&self) -> Result<InvocationConfig, ConfigurationError> {
        Ok(self.0.clone())
    }
}
