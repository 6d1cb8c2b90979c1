//! Password policy construction and validation.
//!
//! A [`PasswordPolicy`] is an ordered list of [`PasswordRule`]s. Vector
//! order is priority order: when several rules fail, the first one in the
//! list supplies the surfaced error. The stock policy requires a minimum
//! of [`DEFAULT_MIN_LENGTH`] characters, mixed case, a digit, and a symbol
//! from [`DEFAULT_SYMBOLS`], in that order.

use crate::rules::PasswordRule;
use cg_core::report::RuleKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length required by the stock policy.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Symbol set accepted by the stock policy.
pub const DEFAULT_SYMBOLS: &str = "#?!@$%^&*-";

/// Errors raised when constructing an invalid policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Minimum length must be at least 1")]
    ZeroMinLength,

    #[error("Symbol rule requires a non-empty symbol set")]
    EmptySymbolSet,

    #[error("Symbol set may not contain '{0}'")]
    InvalidSymbol(char),

    #[error("Policy contains more than one '{0}' rule")]
    DuplicateRule(RuleKind),
}

/// An ordered set of password rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PasswordRule>", into = "Vec<PasswordRule>")]
pub struct PasswordPolicy {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicy {
    /// Creates a policy from rules in priority order.
    ///
    /// Rejects rules with degenerate parameters and duplicate rule kinds.
    /// An empty rule list is allowed and accepts every password.
    pub fn new(rules: Vec<PasswordRule>) -> Result<Self, PolicyError> {
        for rule in &rules {
            validate_rule(rule)?;
        }

        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.kind() == rule.kind()) {
                return Err(PolicyError::DuplicateRule(rule.kind()));
            }
        }

        Ok(Self { rules })
    }

    /// Starts a builder for assembling a policy rule by rule.
    pub fn builder() -> PasswordPolicyBuilder {
        PasswordPolicyBuilder::new()
    }

    /// Returns the rules in priority order.
    pub fn rules(&self) -> &[PasswordRule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the policy has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the configured minimum length, if a length rule exists.
    pub fn min_length(&self) -> Option<usize> {
        self.rules.iter().find_map(|r| match r {
            PasswordRule::MinLength { min } => Some(*min),
            _ => None,
        })
    }

    /// Returns the configured symbol set, if a symbol rule exists.
    pub fn symbols(&self) -> Option<&str> {
        self.rules.iter().find_map(|r| match r {
            PasswordRule::Symbol { symbols } => Some(symbols.as_str()),
            _ => None,
        })
    }
}

/// The stock signup policy: length, mixed case, digit, then symbol.
impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                PasswordRule::MinLength {
                    min: DEFAULT_MIN_LENGTH,
                },
                PasswordRule::MixedCase,
                PasswordRule::Digit,
                PasswordRule::Symbol {
                    symbols: DEFAULT_SYMBOLS.to_string(),
                },
            ],
        }
    }
}

impl TryFrom<Vec<PasswordRule>> for PasswordPolicy {
    type Error = PolicyError;

    fn try_from(rules: Vec<PasswordRule>) -> Result<Self, Self::Error> {
        PasswordPolicy::new(rules)
    }
}

impl From<PasswordPolicy> for Vec<PasswordRule> {
    fn from(policy: PasswordPolicy) -> Self {
        policy.rules
    }
}

fn validate_rule(rule: &PasswordRule) -> Result<(), PolicyError> {
    match rule {
        PasswordRule::MinLength { min: 0 } => Err(PolicyError::ZeroMinLength),
        PasswordRule::Symbol { symbols } => {
            if symbols.is_empty() {
                return Err(PolicyError::EmptySymbolSet);
            }
            // Letters, digits, and whitespace in the symbol set would blur
            // the rule into the other character classes.
            if let Some(c) = symbols
                .chars()
                .find(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            {
                return Err(PolicyError::InvalidSymbol(c));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Builder for assembling a [`PasswordPolicy`].
///
/// Rules take effect in the order the builder methods are called.
#[derive(Debug, Default)]
pub struct PasswordPolicyBuilder {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicyBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a minimum length rule.
    pub fn min_length(mut self, min: usize) -> Self {
        self.rules.push(PasswordRule::MinLength { min });
        self
    }

    /// Adds the mixed-case rule.
    pub fn mixed_case(mut self) -> Self {
        self.rules.push(PasswordRule::MixedCase);
        self
    }

    /// Adds the digit rule.
    pub fn digit(mut self) -> Self {
        self.rules.push(PasswordRule::Digit);
        self
    }

    /// Adds a symbol rule with the given accepted set.
    pub fn symbols(mut self, symbols: &str) -> Self {
        self.rules.push(PasswordRule::Symbol {
            symbols: symbols.to_string(),
        });
        self
    }

    /// Adds an arbitrary rule.
    pub fn rule(mut self, rule: PasswordRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validates and builds the policy.
    pub fn build(self) -> Result<PasswordPolicy, PolicyError> {
        PasswordPolicy::new(self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_shape() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.len(), 4);
        assert_eq!(policy.min_length(), Some(DEFAULT_MIN_LENGTH));
        assert_eq!(policy.symbols(), Some(DEFAULT_SYMBOLS));

        let kinds: Vec<RuleKind> = policy.rules().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::Length,
                RuleKind::Case,
                RuleKind::Numeric,
                RuleKind::Symbol
            ]
        );
    }

    #[test]
    fn test_empty_policy_allowed() {
        let policy = PasswordPolicy::new(vec![]).unwrap();
        assert!(policy.is_empty());
        assert_eq!(policy.min_length(), None);
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let result = PasswordPolicy::new(vec![PasswordRule::MinLength { min: 0 }]);
        assert_eq!(result.unwrap_err(), PolicyError::ZeroMinLength);
    }

    #[test]
    fn test_empty_symbol_set_rejected() {
        let result = PasswordPolicy::new(vec![PasswordRule::Symbol {
            symbols: String::new(),
        }]);
        assert_eq!(result.unwrap_err(), PolicyError::EmptySymbolSet);
    }

    #[test]
    fn test_alphanumeric_symbol_rejected() {
        let result = PasswordPolicy::new(vec![PasswordRule::Symbol {
            symbols: "#a!".to_string(),
        }]);
        assert_eq!(result.unwrap_err(), PolicyError::InvalidSymbol('a'));
    }

    #[test]
    fn test_whitespace_symbol_rejected() {
        let result = PasswordPolicy::new(vec![PasswordRule::Symbol {
            symbols: "# !".to_string(),
        }]);
        assert_eq!(result.unwrap_err(), PolicyError::InvalidSymbol(' '));
    }

    #[test]
    fn test_duplicate_rule_kind_rejected() {
        let result = PasswordPolicy::new(vec![
            PasswordRule::MinLength { min: 8 },
            PasswordRule::MinLength { min: 12 },
        ]);
        assert_eq!(result.unwrap_err(), PolicyError::DuplicateRule(RuleKind::Length));
    }

    #[test]
    fn test_builder_standard_policy() {
        let policy = PasswordPolicy::builder()
            .min_length(10)
            .mixed_case()
            .digit()
            .symbols("#!")
            .build()
            .unwrap();

        assert_eq!(policy.len(), 4);
        assert_eq!(policy.min_length(), Some(10));
        assert_eq!(policy.symbols(), Some("#!"));
    }

    #[test]
    fn test_builder_order_is_priority_order() {
        let policy = PasswordPolicy::builder()
            .digit()
            .min_length(8)
            .build()
            .unwrap();

        let kinds: Vec<RuleKind> = policy.rules().iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![RuleKind::Numeric, RuleKind::Length]);
    }

    #[test]
    fn test_builder_rejects_invalid_rule() {
        let result = PasswordPolicy::builder().min_length(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let policy = PasswordPolicy::default();
        let yaml = serde_yaml::to_string(&policy).unwrap();
        let parsed: PasswordPolicy = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, policy);
    }

    #[test]
    fn test_deserialize_rejects_invalid_policy() {
        // Duplicate rule kinds must be rejected at deserialization time too.
        let yaml = "- min_length:\n    min: 8\n- min_length:\n    min: 10\n";
        let result: Result<PasswordPolicy, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
