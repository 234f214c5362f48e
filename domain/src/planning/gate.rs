//! Confirmation gate.
//!
//! Decides how much operator confirmation a plan needs before it is handed
//! to the execution layer. Prompting is left to the caller; the gate only
//! says which level applies and whether a given answer satisfies it.

use super::plan::InvocationPlan;
use crate::config::InvocationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal answer required for double confirmation.
pub const DOUBLE_CONFIRMATION_TOKEN: &str = "YES";

/// Required confirmation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationLevel {
    None,
    Single,
    Double,
}

impl ConfirmationLevel {
    pub fn is_required(self) -> bool {
        self != ConfirmationLevel::None
    }

    /// Whether `answer` lets execution proceed at this level.
    ///
    /// Single confirmation accepts `y`, `yes` (any case) or an empty answer.
    /// Double confirmation accepts only the literal `YES`.
    pub fn accepts(self, answer: &str) -> bool {
        let answer = answer.trim();
        match self {
            ConfirmationLevel::None => true,
            ConfirmationLevel::Single => {
                answer.is_empty()
                    || answer.eq_ignore_ascii_case("y")
                    || answer.eq_ignore_ascii_case("yes")
            }
            ConfirmationLevel::Double => answer == DOUBLE_CONFIRMATION_TOKEN,
        }
    }
}

impl fmt::Display for ConfirmationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfirmationLevel::None => "none",
            ConfirmationLevel::Single => "single",
            ConfirmationLevel::Double => "double",
        };
        write!(f, "{}", label)
    }
}

/// Confirmation level required for `plan`.
pub fn needs_confirmation(plan: &InvocationPlan, config: &InvocationConfig) -> ConfirmationLevel {
    if !plan.requires_confirmation {
        ConfirmationLevel::None
    } else if plan.agent_count() > config.safety_checks.require_double_confirmation_above {
        ConfirmationLevel::Double
    } else {
        ConfirmationLevel::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentRecord, Roster};
    use crate::planning::plan::build_plan;

    fn plan_with(count: usize, config: &InvocationConfig) -> InvocationPlan {
        let roster =
            Roster::from_records((0..count).map(|i| AgentRecord::new(format!("agent-{}", i))));
        build_plan("custom request", config, &roster)
    }

    #[test]
    fn test_small_plan_needs_nothing() {
        let config = InvocationConfig::new();
        let plan = plan_with(5, &config);
        assert_eq!(needs_confirmation(&plan, &config), ConfirmationLevel::None);
    }

    #[test]
    fn test_medium_plan_needs_single() {
        let config = InvocationConfig::new();
        let plan = plan_with(25, &config);
        assert!(plan.requires_confirmation);
        assert_eq!(needs_confirmation(&plan, &config), ConfirmationLevel::Single);
    }

    #[test]
    fn test_thirty_agents_need_double() {
        let config = InvocationConfig::new().with_confirmation_thresholds(10, 25);
        let plan = plan_with(30, &config);
        assert!(plan.requires_confirmation);
        assert_eq!(needs_confirmation(&plan, &config), ConfirmationLevel::Double);
    }

    #[test]
    fn test_gate_respects_requires_confirmation_flag() {
        // A plan that did not ask for confirmation never gets one, even when
        // it is above the double threshold of a different config.
        let lenient = InvocationConfig::new().with_confirmation_thresholds(100, 200);
        let plan = plan_with(30, &lenient);
        let strict = InvocationConfig::new().with_confirmation_thresholds(1, 2);
        assert_eq!(needs_confirmation(&plan, &strict), ConfirmationLevel::None);
    }

    #[test]
    fn test_single_accepts_yes_variants() {
        let level = ConfirmationLevel::Single;
        assert!(level.accepts(""));
        assert!(level.accepts("y"));
        assert!(level.accepts("Yes\n"));
        assert!(!level.accepts("n"));
        assert!(!level.accepts("sure"));
    }

    #[test]
    fn test_double_requires_literal_token() {
        let level = ConfirmationLevel::Double;
        assert!(level.accepts("YES"));
        assert!(level.accepts("YES\n"));
        assert!(!level.accepts("yes"));
        assert!(!level.accepts(""));
    }

    #[test]
    fn test_none_accepts_anything() {
        assert!(ConfirmationLevel::None.accepts("no"));
        assert!(!ConfirmationLevel::None.is_required());
        assert!(ConfirmationLevel::Double > ConfirmationLevel::Single);
    }
}
