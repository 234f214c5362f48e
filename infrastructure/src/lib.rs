//! Infrastructure layer for rollcall
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including settings and orchestration loading.

pub mod config;
pub mod logging;
pub mod roster;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDiscoveryConfig, FileOutputConfig, FilePathsConfig,
    FilePolicyConfig, YamlInvocationConfigSource,
};
pub use logging::JsonlAuditLog;
pub use roster::{
    AgentDiscovery, DiscoveryCache, ManifestRosterSource, TeamManifest, TeamRosterSource,
    save_discovery_cache,
};
