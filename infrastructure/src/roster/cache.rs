//! Discovery cache (`.agent_discovery_cache.json`)

use chrono::{DateTime, Utc};
use rollcall_domain::{AgentRecord, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Snapshot of one discovery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryCache {
    pub timestamp: String,
    pub base_path: String,
    pub agents: BTreeMap<String, AgentRecord>,
    pub agent_count: usize,
    pub valid_agents: Vec<String>,
}

impl DiscoveryCache {
    pub fn from_roster(roster: &Roster, base_path: &Path, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            base_path: base_path.display().to_string(),
            agents: roster
                .records()
                .map(|record| (record.id.clone(), record.clone()))
                .collect(),
            agent_count: roster.len(),
            valid_agents: roster.selectable_ids(),
        }
    }
}

/// Write the cache as pretty-printed JSON, replacing any earlier one.
pub fn save_discovery_cache(
    roster: &Roster,
    base_path: &Path,
    cache_path: &Path,
) -> std::io::Result<DiscoveryCache> {
    let cache = DiscoveryCache::from_roster(roster, base_path, Utc::now());
    let json = serde_json::to_string_pretty(&cache)?;
    std::fs::write(cache_path, json)?;
    info!("Discovery cache saved to {}", cache_path.display());
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cache_contents() {
        let roster = Roster::from_records([
            AgentRecord::new("cto"),
            AgentRecord::invalid("broken", "bad encoding"),
        ]);
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).unwrap();
        let cache = DiscoveryCache::from_roster(&roster, Path::new("team"), at);

        assert_eq!(cache.timestamp, "2025-01-14T09:30:00Z");
        assert_eq!(cache.agent_count, 2);
        assert_eq!(cache.valid_agents, vec!["cto"]);
        assert!(cache.agents.contains_key("broken"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".agent_discovery_cache.json");
        let roster = Roster::from_records([AgentRecord::new("ciso")]);

        let saved = save_discovery_cache(&roster, Path::new("team"), &path).unwrap();
        let loaded: DiscoveryCache =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, saved);
    }
}
