//! Invocation planning and verification
//!
//! The decision logic at the heart of rollcall. Every operation here is a
//! pure function of its inputs; the roster and configuration are borrowed
//! read-only for the duration of a call.
//!
//! # Flow
//!
//! ```text
//! request text
//!     │
//!     ▼
//! classify ──► select (+ complete groups) ──► build_plan ──► InvocationPlan
//!                                                               │
//!                                          needs_confirmation ◄─┤
//!                                                               ▼
//!                                                   (external execution)
//!                                                               │
//!                                   ExecutionReport ──► verify ─┴─► InvocationResult
//! ```

pub mod classifier;
pub mod gate;
pub mod plan;
pub mod selector;
pub mod verifier;

pub use classifier::{
    CUSTOM, Classification, ClassificationSource, WHOLE_TEAM, classify, classify_with_source,
};
pub use gate::{ConfirmationLevel, DOUBLE_CONFIRMATION_TOKEN, needs_confirmation};
pub use plan::{InvocationPlan, build_plan, build_plan_for, check_critical_agents};
pub use selector::{Selection, SelectionSource, select};
pub use verifier::{ExecutionReport, InvocationResult, completion_rate, verify};
