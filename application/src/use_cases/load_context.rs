//! Load the roster and configuration snapshots for one planning session.

use crate::ports::sources::{ConfigurationError, InvocationConfigSource, RosterSource};
use rollcall_domain::{ConfigIssue, InvocationConfig, Roster};
use tracing::{debug, warn};

/// Immutable inputs shared by planning and verification.
///
/// Loaded once; every use case borrows it read-only, so concurrent calls
/// against the same context need no locking.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    pub roster: Roster,
    pub config: InvocationConfig,
    /// Load, consistency and reference issues, in that order
    pub config_issues: Vec<ConfigIssue>,
}

impl PlanningContext {
    /// Build a context from already-loaded documents.
    pub fn new(roster: Roster, config: InvocationConfig) -> Self {
        let mut config_issues = config.load_issues.clone();
        config_issues.extend(config.validate());
        config_issues.extend(config.validate_references(&roster));
        Self {
            roster,
            config,
            config_issues,
        }
    }

    /// Load both documents. Either one failing is fatal.
    pub fn load(
        roster_source: &dyn RosterSource,
        config_source: &dyn InvocationConfigSource,
    ) -> Result<Self, ConfigurationError> {
        let roster = roster_source.load_roster()?;
        let config = config_source.load_config()?;
        debug!(
            "Loaded roster with {} agents ({} critical) and {} invocation rules",
            roster.len(),
            roster.critical_agents().len(),
            config.invocation_rules.len()
        );

        let context = Self::new(roster, config);
        for issue in &context.config_issues {
            warn!("Configuration issue [{:?}] {}", issue.code, issue);
        }
        Ok(context)
    }
}
