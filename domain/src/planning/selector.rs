//! Agent selection.
//!
//! Resolves a request-type tag to an ordered, duplicate-free list of agent
//! identifiers, then applies complete-group expansion.

use crate::agent::Roster;
use crate::config::{InvocationConfig, SelectionFallback};
use serde::Serialize;

/// Where the initial agent list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// An `invocation_rules` entry
    Rule,
    /// A `presets` entry
    Preset,
    /// No rule or preset matched; the fallback policy was applied
    Fallback(SelectionFallback),
}

/// The outcome of selecting agents for a request type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Selected agents: configured order first, then group completions
    pub agents: Vec<String>,
    /// Agents appended by complete-group expansion, in the order added
    pub added_for_completeness: Vec<String>,
    pub source: SelectionSource,
}

impl Selection {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, SelectionSource::Fallback(_))
    }
}

/// Select agents for `request_type`.
///
/// Rules take precedence over presets. A request type with neither falls
/// back to `config.policy.unknown_request`, which by default selects the
/// whole roster rather than risk leaving an agent out.
pub fn select(request_type: &str, config: &InvocationConfig, roster: &Roster) -> Selection {
    let (initial, source) = if let Some(rule) = config.invocation_rules.get(request_type) {
        (rule.agents.resolve(roster), SelectionSource::Rule)
    } else if let Some(preset) = config.presets.get(request_type) {
        (preset.agents.clone(), SelectionSource::Preset)
    } else {
        let fallback = config.policy.unknown_request;
        let agents = match fallback {
            SelectionFallback::EntireRoster => roster.selectable_ids(),
            SelectionFallback::CriticalAgents => roster.critical_agents().to_vec(),
        };
        (agents, SelectionSource::Fallback(fallback))
    };

    let mut agents = dedup_preserving_order(initial);
    let added_for_completeness = complete_groups(&mut agents, config);

    Selection {
        agents,
        added_for_completeness,
        source,
    }
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Append the `must_include` members of every triggered complete group.
///
/// Runs to a fixed point, so an agent added by one group can trigger
/// another. Returns the appended identifiers.
fn complete_groups(agents: &mut Vec<String>, config: &InvocationConfig) -> Vec<String> {
    let mut added = Vec::new();

    loop {
        let mut changed = false;
        for group in config.safety_checks.complete_groups.values() {
            if group.trigger_agents.is_empty() || !group.is_triggered_by(agents) {
                continue;
            }
            for required in &group.must_include {
                if !agents.contains(required) {
                    agents.push(required.clone());
                    added.push(required.clone());
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    added
}
