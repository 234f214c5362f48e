//! Configuration value objects for the domain layer
//!
//! The orchestration configuration in its typed, validated form, the
//! planning policy knobs, and the issues found while validating them.

mod invocation;
mod output_format;
pub mod policy;
mod validation;

pub use invocation::{
    ALL_AGENTS_MARKER, AgentSelection, CompleteGroup, DEFAULT_CONFIRM_ABOVE,
    DEFAULT_COST_PER_AGENT, DEFAULT_DOUBLE_CONFIRM_ABOVE, DEFAULT_TIME_OVERHEAD,
    DEFAULT_TIME_PER_AGENT, InvocationConfig, InvocationRule, Preset, ResourceEstimate,
    ResourceRates, SafetyChecks,
};
pub use output_format::OutputFormat;
pub use policy::{PlanningPolicy, SelectionFallback, FAIL_OPEN};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
