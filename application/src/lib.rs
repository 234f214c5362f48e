//! Application layer for rollcall
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    audit_log::{AuditLog, AuditRecord, NoAuditLog, RecordingAuditLog},
    confirmation::{
        AutoApproveConfirmation, AutoRejectConfirmation, ConfirmationError, ConfirmationPort,
        ScriptedConfirmation,
    },
    sources::{
        ConfigurationError, DocumentKind, InvocationConfigSource, RosterSource, StaticConfig,
        StaticRoster,
    },
};
pub use use_cases::confirm_invocation::{ConfirmInvocationUseCase, ConfirmationDecision};
pub use use_cases::discover_agents::{DiscoverAgentsUseCase, DiscoveryReport};
pub use use_cases::load_context::PlanningContext;
pub use use_cases::plan_invocation::{PlanInvocationOutput, PlanInvocationUseCase};
pub use use_cases::verify_invocation::{VerifyInvocationOutput, VerifyInvocationUseCase};
