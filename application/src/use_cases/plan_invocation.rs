//! Plan invocation use case
//!
//! Classifies a request, selects the agents for it and decides how much
//! confirmation the resulting plan needs before anyone runs it.

use super::load_context::PlanningContext;
use rollcall_domain::planning::classify_with_source;
use rollcall_domain::{
    Classification, ConfirmationLevel, InvocationPlan, build_plan_for, needs_confirmation,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Everything the caller needs to present a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanInvocationOutput {
    pub plan: InvocationPlan,
    pub confirmation: ConfirmationLevel,
    pub classification: Classification,
}

/// Use case for turning request text into an invocation plan.
pub struct PlanInvocationUseCase<'a> {
    context: &'a PlanningContext,
}

impl<'a> PlanInvocationUseCase<'a> {
    pub fn new(context: &'a PlanningContext) -> Self {
        Self { context }
    }

    pub fn execute(&self, request_text: &str) -> PlanInvocationOutput {
        let config = &self.context.config;
        let classification = classify_with_source(request_text, config);
        debug!(
            "Classified request as '{}' ({:?})",
            classification.request_type, classification.source
        );

        let plan = build_plan_for(
            request_text,
            classification.request_type.clone(),
            config,
            &self.context.roster,
        );
        if plan.used_fallback {
            warn!(
                "No rule or preset for '{}'; falling back to {:?}",
                plan.request_type, config.policy.unknown_request
            );
        }
        if !plan.missing_critical.is_empty() {
            warn!(
                "Plan omits critical agents: {}",
                plan.missing_critical.join(", ")
            );
        }

        let confirmation = needs_confirmation(&plan, config);
        info!(
            "Planned {} agents for '{}' (~{:.1} min, ${:.2}, confirmation: {})",
            plan.agent_count(),
            plan.request_type,
            plan.estimated_time,
            plan.estimated_cost,
            confirmation
        );

        PlanInvocationOutput {
            plan,
            confirmation,
            classification,
        }
    }
}
