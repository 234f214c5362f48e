//! Structured issues found while validating an orchestration configuration.
//!
//! Problems with the shape of individual entries are never fatal: the
//! offending entry is dropped, an issue is recorded, and selection falls
//! back to the fail-open policy. Issues are returned to callers so they can
//! be logged and surfaced as plan warnings.
//!
//! # Examples
//!
//! ```
//! use rollcall_domain::config::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::error(
//!     ConfigIssueCode::MalformedAgentList,
//!     "security_review",
//!     "`agents` must be a list or \"all\"",
//! );
//! assert_eq!(issue.severity, Severity::Error);
//! assert!(ConfigIssue::has_errors(&[issue]));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The entry was unusable and has been dropped.
    Error,
    /// The entry is usable but probably not what was intended.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigIssueCode {
    /// An `agents` field is neither a list nor the `"all"` marker.
    MalformedAgentList,
    /// An alias entry is neither a phrase nor a list of phrases.
    MalformedAlias,
    /// An alias phrase is empty and would match every request.
    EmptyAliasPhrase,
    /// A complete-group list is not a list of agent ids; the group was dropped.
    MalformedCompleteGroup,
    /// A complete-group rule has no trigger agents and can never fire.
    EmptyTriggerSet,
    /// A rule, preset or group references an agent the roster does not know.
    UnknownAgent,
    /// The double-confirmation threshold is below the single one.
    InvertedConfirmationThresholds,
    /// A confirmation threshold is not a non-negative integer; the default applies.
    MalformedThreshold,
    /// A resource rate is negative or not a finite number.
    InvalidRate,
}

/// A detected issue in the orchestration configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    /// The config key the issue is about (rule name, preset name, field path)
    pub subject: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(
        code: ConfigIssueCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        code: ConfigIssueCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Whether any issue in the slice is an error.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|issue| issue.severity == Severity::Error)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
