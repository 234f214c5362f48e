//! Domain layer for rollcall
//!
//! This crate contains the agent roster model, the typed orchestration
//! configuration, and the planning/verification logic. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roster
//!
//! The authoritative set of known agents. Some agents are *critical*: a plan
//! that leaves one out is flagged, and a run that skips one is unsuccessful.
//!
//! ## Plan / Result
//!
//! - **Plan**: the agents a request should reach, with time/cost estimates
//! - **Result**: the plan reconciled against what actually ran

pub mod agent;
pub mod config;
pub mod core;
pub mod planning;

// Re-export commonly used types
pub use agent::{AgentRecord, CountSource, Roster, RosterIssue};
pub use config::{
    AgentSelection, CompleteGroup, ConfigIssue, ConfigIssueCode, InvocationConfig,
    InvocationRule, OutputFormat, PlanningPolicy, Preset, ResourceEstimate, ResourceRates,
    SafetyChecks, SelectionFallback, Severity,
};
pub use planning::{
    Classification, ClassificationSource, ConfirmationLevel, ExecutionReport, InvocationPlan,
    InvocationResult, Selection, SelectionSource, build_plan, build_plan_for, classify,
    needs_confirmation, select, verify,
};
