//! Confirmation port for large invocations.
//!
//! The confirmation gate in the domain decides *whether* a plan needs
//! operator confirmation and at which level; this port is how the
//! application actually asks.
//!
//! # Built-in Implementations
//!
//! - [`AutoApproveConfirmation`] - Always proceeds (`--yes`)
//! - [`AutoRejectConfirmation`] - Never proceeds when confirmation is required
//!
//! For interactive use, see `InteractiveConfirmation` in the presentation layer.

use rollcall_domain::{ConfirmationLevel, InvocationPlan};

/// Error type for confirmation prompts.
///
/// These represent failures while asking, not a "no" from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    /// Operator cancelled (e.g. end of input)
    Cancelled,
    /// Terminal read/write failure
    IoError(String),
}

impl std::fmt::Display for ConfirmationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationError::Cancelled => write!(f, "Confirmation cancelled"),
            ConfirmationError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConfirmationError {}

/// Port for asking an operator to confirm a plan.
///
/// Only called when `level` is [`ConfirmationLevel::Single`] or
/// [`ConfirmationLevel::Double`].
pub trait ConfirmationPort: Send + Sync {
    fn confirm(
        &self,
        plan: &InvocationPlan,
        level: ConfirmationLevel,
    ) -> Result<bool, ConfirmationError>;
}

/// Always approves. Use for non-interactive runs where the operator has
/// already agreed (`--yes`).
pub struct AutoApproveConfirmation;

impl ConfirmationPort for AutoApproveConfirmation {
    fn confirm(
        &self,
        _plan: &InvocationPlan,
        _level: ConfirmationLevel,
    ) -> Result<bool, ConfirmationError> {
        Ok(true)
    }
}

/// Always declines. The safest non-interactive mode.
pub struct AutoRejectConfirmation;

impl ConfirmationPort for AutoRejectConfirmation {
    fn confirm(
        &self,
        _plan: &InvocationPlan,
        _level: ConfirmationLevel,
    ) -> Result<bool, ConfirmationError> {
        Ok(false)
    }
}

/// Replays a fixed answer through [`ConfirmationLevel::accepts`].
pub struct ScriptedConfirmation(pub String);

impl ConfirmationPort for ScriptedConfirmation {
    fn confirm(
        &self,
        _plan: &InvocationPlan,
        level: ConfirmationLevel,
    ) -> Result<bool, ConfirmationError> {
        Ok(level.accepts(&self.0))
    }
}
