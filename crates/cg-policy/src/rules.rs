//! Password rule definitions for credgate.
//!
//! Each [`PasswordRule`] is a self-contained predicate over the raw
//! password, carrying its own parameters. Rules know their stable
//! [`RuleKind`], the error category they raise, the message shown when they
//! are the first failure, and a short checklist label for live feedback.

use cg_core::report::{ErrorCategory, RuleKind};
use serde::{Deserialize, Serialize};

/// A single password requirement.
///
/// Rules are plain data so policies can be built in code or loaded from
/// configuration. Evaluation never short-circuits across rules; the engine
/// runs every rule and records each outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    /// Password must be at least `min` characters long.
    MinLength { min: usize },
    /// Password must contain a lowercase and an uppercase ASCII letter.
    MixedCase,
    /// Password must contain at least one ASCII digit.
    Digit,
    /// Password must contain at least one character from `symbols`.
    Symbol { symbols: String },
}

impl PasswordRule {
    /// Returns the stable identifier of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            PasswordRule::MinLength { .. } => RuleKind::Length,
            PasswordRule::MixedCase => RuleKind::Case,
            PasswordRule::Digit => RuleKind::Numeric,
            PasswordRule::Symbol { .. } => RuleKind::Symbol,
        }
    }

    /// Returns the error category raised when this rule fails.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PasswordRule::MinLength { .. } => ErrorCategory::Length,
            PasswordRule::MixedCase => ErrorCategory::Case,
            PasswordRule::Digit => ErrorCategory::Numeric,
            PasswordRule::Symbol { .. } => ErrorCategory::Symbol,
        }
    }

    /// Evaluates this rule against a candidate password.
    ///
    /// Length counts characters, not bytes. The letter and digit classes
    /// are ASCII, matching the character classes signup forms conventionally
    /// enforce.
    pub fn is_satisfied(&self, password: &str) -> bool {
        match self {
            PasswordRule::MinLength { min } => password.chars().count() >= *min,
            PasswordRule::MixedCase => {
                password.chars().any(|c| c.is_ascii_lowercase())
                    && password.chars().any(|c| c.is_ascii_uppercase())
            }
            PasswordRule::Digit => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::Symbol { symbols } => password.chars().any(|c| symbols.contains(c)),
        }
    }

    /// Returns the message surfaced when this rule is the first failure.
    pub fn message(&self) -> String {
        match self {
            PasswordRule::MinLength { min } => format!("Must be at least {} characters", min),
            PasswordRule::MixedCase => {
                "Must include both uppercase and lowercase letters".to_string()
            }
            PasswordRule::Digit => "Must include at least one number".to_string(),
            PasswordRule::Symbol { .. } => "Must include at least one symbol".to_string(),
        }
    }

    /// Returns the short label for checklist display.
    pub fn label(&self) -> String {
        match self {
            PasswordRule::MinLength { min } => format!("Minimum {} characters", min),
            PasswordRule::MixedCase => "Uppercase and lowercase letters".to_string(),
            PasswordRule::Digit => "At least one number".to_string(),
            PasswordRule::Symbol { .. } => "At least one symbol".to_string(),
        }
    }
}
