//! Confirmation gate use case

use crate::ports::confirmation::{ConfirmationError, ConfirmationPort};
use rollcall_domain::{ConfirmationLevel, InvocationPlan};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of passing a plan through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationDecision {
    pub level: ConfirmationLevel,
    pub approved: bool,
}

/// Asks the operator to approve a plan when its size calls for it.
pub struct ConfirmInvocationUseCase<C: ConfirmationPort> {
    confirmation: Arc<C>,
}

impl<C: ConfirmationPort> ConfirmInvocationUseCase<C> {
    pub fn new(confirmation: Arc<C>) -> Self {
        Self { confirmation }
    }

    /// Plans below the single-confirmation threshold pass without a prompt.
    pub fn execute(
        &self,
        plan: &InvocationPlan,
        level: ConfirmationLevel,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        if !level.is_required() {
            debug!("No confirmation needed for {} agents", plan.agent_count());
            return Ok(ConfirmationDecision {
                level,
                approved: true,
            });
        }

        let approved = self.confirmation.confirm(plan, level)?;
        info!(
            "Invocation of {} agents {} ({} confirmation)",
            plan.agent_count(),
            if approved { "approved" } else { "declined" },
            level
        );
        Ok(ConfirmationDecision { level, approved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::confirmation::{AutoRejectConfirmation, ScriptedConfirmation};
    use rollcall_domain::{AgentRecord, AgentSelection, InvocationConfig, Roster, build_plan};

    fn plan() -> InvocationPlan {
        let roster = Roster::from_records([AgentRecord::new("a"), AgentRecord::new("b")]);
        let config = InvocationConfig::new().with_rule("custom", AgentSelection::All);
        build_plan("something odd", &config, &roster)
    }

    #[test]
    fn test_no_prompt_when_not_required() {
        let use_case = ConfirmInvocationUseCase::new(Arc::new(AutoRejectConfirmation));
        let decision = use_case.execute(&plan(), ConfirmationLevel::None).unwrap();
        assert!(decision.approved);
    }

    #[test]
    fn test_double_confirmation_needs_exact_token() {
        let lowercase = ConfirmInvocationUseCase::new(Arc::new(ScriptedConfirmation("yes".into())));
        let decision = lowercase
            .execute(&plan(), ConfirmationLevel::Double)
            .unwrap();
        assert!(!decision.approved);

        let exact = ConfirmInvocationUseCase::new(Arc::new(ScriptedConfirmation("YES".into())));
        assert!(exact.execute(&plan(), ConfirmationLevel::Double).unwrap().approved);
    }

    #[test]
    fn test_rejection_is_reported() {
        let use_case = ConfirmInvocationUseCase::new(Arc::new(AutoRejectConfirmation));
        let decision = use_case.execute(&plan(), ConfirmationLevel::Single).unwrap();
        assert_eq!(decision.level, ConfirmationLevel::Single);
        assert!(!decision.approved);
    }
}
