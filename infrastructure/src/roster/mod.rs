//! Roster sources: team manifest, directory discovery, and the combination
//! of the two that the CLI uses.

mod cache;
mod discovery;
mod manifest;
mod team;

pub use cache::{DiscoveryCache, save_discovery_cache};
pub use discovery::{AgentDiscovery, extract_metadata};
pub use manifest::{ManifestAgent, ManifestRosterSource, ManifestValidation, TeamManifest};
pub use team::TeamRosterSource;
