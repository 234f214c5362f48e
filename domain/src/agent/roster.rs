//! The agent roster: the authoritative set of known agents.
//!
//! A [`Roster`] is built once per load (from a manifest or by directory
//! discovery) and handed to the planning core by reference. Besides the
//! agent records it carries the list of *critical* agents, which must never
//! be silently omitted from a plan, and optional domain groupings used for
//! reporting.

use super::entities::AgentRecord;
use crate::core::string::title_case_slug;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Immutable snapshot of every known agent.
///
/// Records are keyed by identifier and iterate in identifier order so that
/// everything derived from a roster is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    agents: BTreeMap<String, AgentRecord>,
    critical_agents: Vec<String>,
    domain_groups: IndexMap<String, Vec<String>>,
    expected_total: Option<usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from records; later records replace earlier ones with the same id.
    pub fn from_records(records: impl IntoIterator<Item = AgentRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::new(), |roster, record| roster.with_agent(record))
    }

    pub fn with_agent(mut self, record: AgentRecord) -> Self {
        self.agents.insert(record.id.clone(), record);
        self
    }

    /// Declares the critical agent list. Duplicates are dropped, order is kept.
    pub fn with_critical_agents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.critical_agents.clear();
        for id in ids {
            let id = id.into();
            if !self.critical_agents.contains(&id) {
                self.critical_agents.push(id);
            }
        }
        self
    }

    pub fn with_domain_group<I, S>(mut self, name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_groups
            .insert(name.into(), ids.into_iter().map(Into::into).collect());
        self
    }

    /// Number of agents the manifest claims the roster should contain.
    pub fn with_expected_total(mut self, total: usize) -> Self {
        self.expected_total = Some(total);
        self
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AgentRecord> {
        self.agents.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    pub fn records(&self) -> impl Iterator<Item = &AgentRecord> {
        self.agents.values()
    }

    /// Every identifier in the roster, in identifier order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    /// Identifiers eligible for fail-open selection.
    ///
    /// Records flagged invalid at load time are left out; validity is the
    /// roster's concern, so the selector never inspects it.
    pub fn selectable_ids(&self) -> Vec<String> {
        self.agents
            .values()
            .filter(|record| record.valid)
            .map(|record| record.id.clone())
            .collect()
    }

    pub fn valid_count(&self) -> usize {
        self.agents.values().filter(|record| record.valid).count()
    }

    pub fn critical_agents(&self) -> &[String] {
        &self.critical_agents
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.critical_agents.iter().any(|critical| critical == id)
    }

    pub fn expected_total(&self) -> Option<usize> {
        self.expected_total
    }

    /// Display name for an identifier, falling back to the identifier itself.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.agents
            .get(id)
            .map(|record| record.display_name.as_str())
            .unwrap_or(id)
    }

    /// Priority label for an identifier, `unknown` when not declared.
    pub fn priority_label(&self, id: &str) -> &str {
        self.agents
            .get(id)
            .map(AgentRecord::priority_label)
            .unwrap_or("unknown")
    }

    /// Domain groups, either declared explicitly or derived from the
    /// `domain_group` field of each record.
    pub fn domain_groups(&self) -> IndexMap<String, Vec<String>> {
        if !self.domain_groups.is_empty() {
            return self.domain_groups.clone();
        }

        let mut derived: IndexMap<String, Vec<String>> = IndexMap::new();
        for record in self.agents.values() {
            if let Some(group) = &record.domain_group {
                derived
                    .entry(group.clone())
                    .or_default()
                    .push(record.id.clone());
            }
        }
        derived
    }

    /// Partition `ids` by domain group for reporting.
    ///
    /// Groups keep their declared order and members keep the group's order;
    /// groups with no member in `ids` are omitted. The returned names are
    /// title-cased (`security_team` → `Security Team`).
    pub fn group_members(&self, ids: &[String]) -> Vec<(String, Vec<String>)> {
        self.domain_groups()
            .into_iter()
            .filter_map(|(group, members)| {
                let present: Vec<String> = members
                    .into_iter()
                    .filter(|member| ids.contains(member))
                    .collect();
                (!present.is_empty()).then(|| (title_case_slug(&group), present))
            })
            .collect()
    }

    /// Critical agents that are absent from the roster or flagged invalid.
    pub fn missing_critical(&self) -> Vec<String> {
        self.critical_agents
            .iter()
            .filter(|id| !self.agents.get(id.as_str()).is_some_and(|r| r.valid))
            .cloned()
            .collect()
    }

    /// Check roster completeness.
    ///
    /// Reports a count mismatch against the manifest's declared total and
    /// against `expected` (if given), every critical agent that is missing
    /// or invalid, and every invalid record.
    pub fn validate(&self, expected: Option<usize>) -> Vec<RosterIssue> {
        let found = self.len();
        let mut issues = Vec::new();

        if let Some(declared) = self.expected_total
            && declared != found
        {
            issues.push(RosterIssue::CountMismatch {
                found,
                expected: declared,
                source: CountSource::Manifest,
            });
        }

        for critical in self.missing_critical() {
            issues.push(RosterIssue::MissingCritical(critical));
        }

        if let Some(expected) = expected
            && expected != found
        {
            issues.push(RosterIssue::CountMismatch {
                found,
                expected,
                source: CountSource::Requested,
            });
        }

        for record in self.agents.values().filter(|record| !record.valid) {
            issues.push(RosterIssue::InvalidAgent(record.id.clone()));
        }

        issues
    }
}

/// Where an expected agent count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountSource {
    /// `total_agents` declared by the manifest
    Manifest,
    /// Count requested by the caller
    Requested,
}

/// A completeness problem found by [`Roster::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterIssue {
    CountMismatch {
        found: usize,
        expected: usize,
        source: CountSource,
    },
    MissingCritical(String),
    InvalidAgent(String),
}

impl RosterIssue {
    pub fn is_critical(&self) -> bool {
        matches!(self, RosterIssue::MissingCritical(_))
    }
}

impl fmt::Display for RosterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterIssue::CountMismatch {
                found,
                expected,
                source: CountSource::Manifest,
            } => write!(
                f,
                "Agent count mismatch: Found {}, Manifest expects {}",
                found, expected
            ),
            RosterIssue::CountMismatch {
                found, expected, ..
            } => write!(f, "Expected {} agents, found {}", expected, found),
            RosterIssue::MissingCritical(id) => {
                write!(f, "CRITICAL: Missing required agent: {}", id)
            }
            RosterIssue::InvalidAgent(id) => write!(f, "Invalid agent file: {}", id),
        }
    }
}
