//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod confirm_invocation;
pub mod discover_agents;
pub mod load_context;
pub mod plan_invocation;
pub mod verify_invocation;
