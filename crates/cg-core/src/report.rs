//! Structured validation results for credgate.
//!
//! A [`ValidationReport`] is the complete outcome of checking one
//! [`SignupRequest`](crate::record::SignupRequest): at most one error per
//! field, plus one [`RuleOutcome`] per password rule so callers can render
//! the full pass/fail checklist even when only the first failure's message
//! is displayed.
//!
//! Outcomes are data, never errors. Rule identity travels as [`RuleKind`],
//! so callers branch on the kind rather than inspecting message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a password rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Minimum length requirement.
    Length,
    /// Requires both lowercase and uppercase letters.
    Case,
    /// Requires at least one digit.
    Numeric,
    /// Requires at least one symbol from the policy's set.
    Symbol,
}

impl RuleKind {
    /// Returns the stable string identifier for this rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Length => "length",
            RuleKind::Case => "case",
            RuleKind::Numeric => "numeric",
            RuleKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Field was empty but is required.
    Required,
    /// Field content is structurally invalid.
    Format,
    /// Password is shorter than the minimum length.
    Length,
    /// Password lacks mixed upper/lower case.
    Case,
    /// Password lacks a digit.
    Numeric,
    /// Password lacks a required symbol.
    Symbol,
    /// Confirmation does not match the password.
    Mismatch,
}

/// A single field-level validation failure.
///
/// The category identifies the failure; the message is display text only
/// and carries no semantics a caller should parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// What kind of failure this is.
    pub category: ErrorCategory,
    /// Human-readable message for display.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Pass/fail result of one password rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Which rule was evaluated.
    pub rule: RuleKind,
    /// Whether the password satisfied it.
    pub satisfied: bool,
}

impl RuleOutcome {
    /// Creates a rule outcome.
    pub fn new(rule: RuleKind, satisfied: bool) -> Self {
        Self { rule, satisfied }
    }
}

/// Complete validation result for one signup record.
///
/// `password_rules` holds one outcome per configured rule in policy
/// priority order, regardless of how many failed. The `password` error,
/// when present, always corresponds to the first unsatisfied outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Email field error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldError>,
    /// Password field error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<FieldError>,
    /// Confirmation field error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirm: Option<FieldError>,
    /// One outcome per password rule, in policy priority order.
    pub password_rules: Vec<RuleOutcome>,
}

impl ValidationReport {
    /// Creates an empty report with no errors and no outcomes.
    pub fn new() -> Self {
        Self {
            email: None,
            password: None,
            password_confirm: None,
            password_rules: Vec::new(),
        }
    }

    /// Returns true if every field passed.
    pub fn is_valid(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.password_confirm.is_none()
    }

    /// Returns the first unsatisfied rule in priority order, if any.
    pub fn first_failed_rule(&self) -> Option<RuleKind> {
        self.password_rules
            .iter()
            .find(|o| !o.satisfied)
            .map(|o| o.rule)
    }

    /// Returns the kinds of all unsatisfied rules, in priority order.
    pub fn failed_rules(&self) -> Vec<RuleKind> {
        self.password_rules
            .iter()
            .filter(|o| !o.satisfied)
            .map(|o| o.rule)
            .collect()
    }

    /// Returns the outcome for one rule kind, if that rule was evaluated.
    pub fn outcome(&self, kind: RuleKind) -> Option<&RuleOutcome> {
        self.password_rules.iter().find(|o| o.rule == kind)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
