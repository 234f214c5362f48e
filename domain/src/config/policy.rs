//! Planning and verification policy constants.
//!
//! The thresholds that decide whether a run counts as complete, and what
//! happens when a request type matches no configured rule, are named here
//! so callers and tests can refer to them directly.

use serde::{Deserialize, Serialize};

/// Minimum fraction of planned agents that must be confirmed invoked.
pub const DEFAULT_COMPLETION_THRESHOLD: f64 = 0.90;

/// Plans larger than this get a large-invocation warning.
pub const DEFAULT_LARGE_INVOCATION_ABOVE: usize = 25;

/// What to select when a request type matches no rule or preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionFallback {
    /// Select every selectable roster agent. Over-inclusion is preferred to
    /// silently omitting an agent.
    #[default]
    EntireRoster,
    /// Select only the roster's critical agents.
    CriticalAgents,
}

/// The fail-open policy applied to unknown request types.
pub const FAIL_OPEN: SelectionFallback = SelectionFallback::EntireRoster;

/// Tunable policy knobs shared by the plan builder and the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningPolicy {
    /// Completion rate below which a verification is unsuccessful (0.0-1.0)
    pub completion_threshold: f64,
    /// Agent count above which a large-invocation warning is added
    pub large_invocation_above: usize,
    /// Selection used for request types without a rule or preset
    pub unknown_request: SelectionFallback,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            large_invocation_above: DEFAULT_LARGE_INVOCATION_ABOVE,
            unknown_request: FAIL_OPEN,
        }
    }
}
