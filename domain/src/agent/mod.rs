//! Agent roster domain module
//!
//! Contains the agent records and the roster that owns them, together with
//! the completeness checks run against a freshly loaded roster.

pub mod entities;
pub mod roster;

pub use entities::AgentRecord;
pub use roster::{CountSource, Roster, RosterIssue};
