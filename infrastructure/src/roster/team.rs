//! Combined roster: discovered definitions plus the team manifest.

use super::discovery::AgentDiscovery;
use super::manifest::TeamManifest;
use rollcall_application::ports::sources::{ConfigurationError, RosterSource};
use rollcall_domain::Roster;
use std::path::PathBuf;
use tracing::{debug, info};

/// Roster source used by the CLI.
///
/// Agents come from the team directory. When a manifest is present it
/// supplies the critical list, domain groups and declared total, and fills
/// in group and priority for definitions that lack them; otherwise the
/// configured fallback critical list applies. Without a team directory the
/// manifest's own agent table is used.
pub struct TeamRosterSource {
    discovery: AgentDiscovery,
    manifest_path: PathBuf,
    fallback_critical_agents: Vec<String>,
}

impl TeamRosterSource {
    pub fn new(discovery: AgentDiscovery, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            discovery,
            manifest_path: manifest_path.into(),
            fallback_critical_agents: Vec::new(),
        }
    }

    pub fn with_fallback_critical_agents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_critical_agents = ids.into_iter().map(Into::into).collect();
        self
    }

    fn load_manifest(&self) -> Result<Option<TeamManifest>, ConfigurationError> {
        match TeamManifest::load(&self.manifest_path) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(e) if e.is_missing() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl RosterSource for TeamRosterSource {
    fn load_roster(&self) -> Result<Roster, ConfigurationError> {
        let manifest = self.load_manifest()?;

        if !self.discovery.team_dir().is_dir()
            && let Some(manifest) = &manifest
        {
            info!(
                "Team directory {} not found, using manifest agents",
                self.discovery.team_dir().display()
            );
            return Ok(manifest.to_roster());
        }

        let mut records = self.discovery.discover()?;
        let Some(manifest) = manifest else {
            debug!("No manifest, using fallback critical agents");
            return Ok(Roster::from_records(records)
                .with_critical_agents(self.fallback_critical_agents.iter().cloned()));
        };

        for record in &mut records {
            let Some(entry) = manifest.agent(&record.id) else {
                continue;
            };
            if record.domain_group.is_none() {
                record.domain_group = entry.domain_group.clone();
            }
            if record.priority.is_none() {
                record.priority = entry.priority.clone();
            }
        }
        Ok(manifest.apply_to(Roster::from_records(records)))
    }
}
