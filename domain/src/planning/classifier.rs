//! Request classification.
//!
//! Maps free-text requests to a request-type tag in three passes:
//!
//! 1. Configured aliases, in declared order; the first alias with a phrase
//!    contained in the request (case-insensitive) wins.
//! 2. Built-in domain keyword rules, in fixed priority order.
//! 3. Generic review verbs, which select the whole team.
//!
//! Anything else is `custom`. Classification never fails.

use crate::config::InvocationConfig;
use serde::Serialize;

/// Tag for requests that should involve the whole team.
pub const WHOLE_TEAM: &str = "whole_team";
/// Tag for requests nothing else matched.
pub const CUSTOM: &str = "custom";

pub const SECURITY_REVIEW: &str = "security_review";
pub const LEADERSHIP_REVIEW: &str = "leadership_review";
pub const TECHNICAL_REVIEW: &str = "technical_review";
pub const PRODUCT_REVIEW: &str = "product_review";
pub const AI_ML_REVIEW: &str = "ai_ml_review";
pub const COMPLIANCE_REVIEW: &str = "compliance_review";

/// Verbs that turn an otherwise unclassified request into a whole-team review.
const REVIEW_VERBS: &[&str] = &["review", "evaluate", "assess", "analyze"];

/// Keyword rules match substrings of the lowercased request.
#[derive(Debug, Clone, Copy)]
enum KeywordRule {
    Any(&'static str, &'static [&'static str]),
    All(&'static str, &'static [&'static str]),
}

/// Domain keyword fallbacks, highest priority first.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule::Any(SECURITY_REVIEW, &["security"]),
    KeywordRule::Any(LEADERSHIP_REVIEW, &["leadership", "executive"]),
    KeywordRule::All(TECHNICAL_REVIEW, &["technical", "review"]),
    KeywordRule::Any(PRODUCT_REVIEW, &["product"]),
    KeywordRule::Any(AI_ML_REVIEW, &["ai", "ml"]),
    KeywordRule::Any(COMPLIANCE_REVIEW, &["compliance"]),
];

impl KeywordRule {
    fn evaluate(self, lowered: &str) -> Option<&'static str> {
        let (tag, matched) = match self {
            KeywordRule::Any(tag, keywords) => (tag, keywords.iter().any(|k| lowered.contains(k))),
            KeywordRule::All(tag, keywords) => (tag, keywords.iter().all(|k| lowered.contains(k))),
        };
        matched.then_some(tag)
    }
}

/// Which pass produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Alias,
    Keyword,
    ReviewVerb,
    Fallback,
}

/// A request type together with the pass that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub request_type: String,
    pub source: ClassificationSource,
}

impl Classification {
    fn new(request_type: impl Into<String>, source: ClassificationSource) -> Self {
        Self {
            request_type: request_type.into(),
            source,
        }
    }
}

/// Classify a request, returning only the request-type tag.
pub fn classify(request_text: &str, config: &InvocationConfig) -> String {
    classify_with_source(request_text, config).request_type
}

/// Classify a request and report which pass matched.
pub fn classify_with_source(request_text: &str, config: &InvocationConfig) -> Classification {
    let lowered = request_text.to_lowercase();

    for (request_type, phrases) in &config.invocation_aliases {
        let hit = phrases
            .iter()
            .filter(|phrase| !phrase.trim().is_empty())
            .any(|phrase| lowered.contains(&phrase.to_lowercase()));
        if hit {
            return Classification::new(request_type.as_str(), ClassificationSource::Alias);
        }
    }

    if let Some(tag) = KEYWORD_RULES.iter().find_map(|rule| rule.evaluate(&lowered)) {
        return Classification::new(tag, ClassificationSource::Keyword);
    }

    if REVIEW_VERBS.iter().any(|verb| lowered.contains(verb)) {
        return Classification::new(WHOLE_TEAM, ClassificationSource::ReviewVerb);
    }

    Classification::new(CUSTOM, ClassificationSource::Fallback)
}
