//! Discover agents use case
//!
//! Loads the roster on its own and runs the completeness checks. Used by
//! `rollcall discover` to validate a team directory before any planning.

use crate::ports::sources::{ConfigurationError, RosterSource};
use rollcall_domain::{Roster, RosterIssue};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    pub roster: Roster,
    pub issues: Vec<RosterIssue>,
    pub missing_critical: Vec<String>,
}

impl DiscoveryReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_critical_gaps(&self) -> bool {
        !self.missing_critical.is_empty()
    }
}

pub struct DiscoverAgentsUseCase<R: RosterSource> {
    source: Arc<R>,
}

impl<R: RosterSource> DiscoverAgentsUseCase<R> {
    pub fn new(source: Arc<R>) -> Self {
        Self { source }
    }

    /// Both the manifest total and `expected` are checked when present.
    pub fn execute(&self, expected: Option<usize>) -> Result<DiscoveryReport, ConfigurationError> {
        let roster = self.source.load_roster()?;
        let issues = roster.validate(expected);
        let missing_critical = roster.missing_critical();

        info!(
            "Discovered {} agents ({} valid)",
            roster.len(),
            roster.valid_count()
        );
        for issue in &issues {
            if issue.is_critical() {
                error!("{}", issue);
            } else {
                warn!("{}", issue);
            }
        }

        Ok(DiscoveryReport {
            roster,
            issues,
            missing_critical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::sources::StaticRoster;
    use rollcall_domain::AgentRecord;

    #[test]
    fn test_complete_roster_is_valid() {
        let roster = Roster::from_records([AgentRecord::new("ciso"), AgentRecord::new("cto")])
            .with_critical_agents(["ciso"]);
        let use_case = DiscoverAgentsUseCase::new(Arc::new(StaticRoster(roster)));

        let report = use_case.execute(Some(2)).unwrap();
        assert!(report.is_valid());
        assert!(!report.has_critical_gaps());
    }

    #[test]
    fn test_missing_critical_agent_is_reported() {
        let roster = Roster::from_records([
            AgentRecord::new("cto"),
            AgentRecord::invalid("privacy-engineer", "unreadable"),
        ])
        .with_critical_agents(["ciso", "privacy-engineer"]);
        let use_case = DiscoverAgentsUseCase::new(Arc::new(StaticRoster(roster)));

        let report = use_case.execute(None).unwrap();
        assert_eq!(report.missing_critical, vec!["ciso", "privacy-engineer"]);
        assert!(report.has_critical_gaps());
        assert!(report.issues.contains(&RosterIssue::InvalidAgent("privacy-engineer".into())));
    }

    #[test]
    fn test_count_mismatch() {
        let roster = Roster::from_records([AgentRecord::new("cto")]);
        let use_case = DiscoverAgentsUseCase::new(Arc::new(StaticRoster(roster)));

        let report = use_case.execute(Some(3)).unwrap();
        assert!(!report.is_valid());
        assert!(!report.has_critical_gaps());
    }
}
