//! Signup validation engine for credgate.
//!
//! [`SignupValidator`] evaluates one [`SignupRequest`] against its
//! configured [`PasswordPolicy`] and returns a [`ValidationReport`].
//! Evaluation is pure and synchronous: no I/O, no shared state, and the
//! same record always yields the same report.
//!
//! Every password rule is evaluated on every call, so the report always
//! carries a complete outcome list even when only the first failure's
//! message is surfaced as the field error.

use crate::policy::PasswordPolicy;
use cg_core::record::SignupRequest;
use cg_core::report::{ErrorCategory, FieldError, RuleOutcome, ValidationReport};
use cg_core::validation::email::validate_email;

/// Validates signup records against a password policy.
///
/// The validator is stateless apart from its policy and is safe to share
/// across threads. Concurrent `validate` calls are independent.
///
/// # Example
///
/// ```
/// use cg_core::SignupRequest;
/// use cg_policy::SignupValidator;
///
/// let validator = SignupValidator::with_default_policy();
/// let report = validator.validate(&SignupRequest::new(
///     "user@example.com",
///     "Abcdef1!",
///     "Abcdef1!",
/// ));
/// assert!(report.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct SignupValidator {
    policy: PasswordPolicy,
}

impl SignupValidator {
    /// Creates a validator with an explicit policy.
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Creates a validator with the stock policy.
    pub fn with_default_policy() -> Self {
        Self::new(PasswordPolicy::default())
    }

    /// Returns the policy this validator applies.
    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Validates a signup record.
    ///
    /// The report holds at most one error per field. The password error,
    /// when present, belongs to the first rule in policy order whose
    /// outcome is unsatisfied; the outcome list always covers every rule.
    pub fn validate(&self, record: &SignupRequest) -> ValidationReport {
        let (password_rules, password) = self.check_password(&record.password);

        ValidationReport {
            email: Self::check_email(&record.email),
            password,
            password_confirm: Self::check_confirmation(
                &record.password,
                &record.password_confirm,
            ),
            password_rules,
        }
    }

    /// Runs every password rule and picks the first failure's error.
    fn check_password(&self, password: &str) -> (Vec<RuleOutcome>, Option<FieldError>) {
        let mut outcomes = Vec::with_capacity(self.policy.len());
        let mut first_failure = None;

        for rule in self.policy.rules() {
            let satisfied = rule.is_satisfied(password);
            outcomes.push(RuleOutcome::new(rule.kind(), satisfied));

            if !satisfied && first_failure.is_none() {
                first_failure = Some(FieldError::new(rule.category(), rule.message()));
            }
        }

        (outcomes, first_failure)
    }

    fn check_email(email: &str) -> Option<FieldError> {
        match validate_email(email) {
            Ok(_) => None,
            Err(err) => {
                let message = match err.category() {
                    ErrorCategory::Required => "Email is required",
                    _ => "Must be a valid email address",
                };
                Some(FieldError::new(err.category(), message))
            }
        }
    }

    fn check_confirmation(password: &str, confirm: &str) -> Option<FieldError> {
        if confirm.is_empty() {
            return Some(FieldError::new(
                ErrorCategory::Required,
                "Please confirm your password",
            ));
        }

        if confirm != password {
            return Some(FieldError::new(
                ErrorCategory::Mismatch,
                "Passwords do not match",
            ));
        }

        None
    }
}

impl Default for SignupValidator {
    fn default() -> Self {
        Self::with_default_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PasswordRule;
    use cg_core::report::RuleKind;

    fn validator() -> SignupValidator {
        SignupValidator::with_default_policy()
    }

    fn record(email: &str, password: &str, confirm: &str) -> SignupRequest {
        SignupRequest::new(email, password, confirm)
    }

    #[test]
    fn test_valid_record_passes_everything() {
        let report = validator().validate(&record("user@example.com", "Abcdef1!", "Abcdef1!"));

        assert!(report.is_valid());
        assert!(report.password_rules.iter().all(|o| o.satisfied));
    }

    #[test]
    fn test_short_password_surfaces_length_error() {
        let report = validator().validate(&record("user@example.com", "Ab1!", "Ab1!"));

        let err = report.password.as_ref().unwrap();
        assert_eq!(err.category, ErrorCategory::Length);
        assert!(!report.outcome(RuleKind::Length).unwrap().satisfied);
        // The other rules were still evaluated and passed.
        assert!(report.outcome(RuleKind::Case).unwrap().satisfied);
        assert!(report.outcome(RuleKind::Numeric).unwrap().satisfied);
        assert!(report.outcome(RuleKind::Symbol).unwrap().satisfied);
    }

    #[test]
    fn test_single_case_password_surfaces_case_error() {
        let report = validator().validate(&record("user@example.com", "abcdef1!", "abcdef1!"));

        let err = report.password.as_ref().unwrap();
        assert_eq!(err.category, ErrorCategory::Case);
        assert!(!report.outcome(RuleKind::Case).unwrap().satisfied);
    }

    #[test]
    fn test_uppercase_only_fails_case_rule() {
        let report = validator().validate(&record("user@example.com", "ABCDEF1!", "ABCDEF1!"));

        assert_eq!(
            report.password.as_ref().unwrap().category,
            ErrorCategory::Case
        );
    }

    #[test]
    fn test_missing_digit_surfaces_numeric_error() {
        let report = validator().validate(&record("user@example.com", "Abcdefg!", "Abcdefg!"));

        assert_eq!(
            report.password.as_ref().unwrap().category,
            ErrorCategory::Numeric
        );
    }

    #[test]
    fn test_missing_symbol_surfaces_symbol_error() {
        let report = validator().validate(&record("user@example.com", "Abcdefg1", "Abcdefg1"));

        assert_eq!(
            report.password.as_ref().unwrap().category,
            ErrorCategory::Symbol
        );
    }

    #[test]
    fn test_empty_password_fails_all_rules_surfaces_length() {
        let report = validator().validate(&record("user@example.com", "", "x"));

        assert_eq!(report.failed_rules().len(), 4);
        assert_eq!(
            report.password.as_ref().unwrap().category,
            ErrorCategory::Length
        );
    }

    #[test]
    fn test_password_error_present_iff_any_outcome_failed() {
        let cases = ["Abcdef1!", "short", "abcdefgh", "ABCDEF1!", ""];
        let v = validator();

        for password in cases {
            let report = v.validate(&record("user@example.com", password, password));
            let any_failed = report.password_rules.iter().any(|o| !o.satisfied);
            assert_eq!(
                report.password.is_some(),
                any_failed,
                "invariant broken for {:?}",
                password
            );
        }
    }

    #[test]
    fn test_invalid_email_reports_format_error() {
        let report = validator().validate(&record("not-an-email", "Abcdef1!", "Abcdef1!"));

        let err = report.email.as_ref().unwrap();
        assert_eq!(err.category, ErrorCategory::Format);
        // The email failure does not disturb the password outcomes.
        assert!(report.password.is_none());
    }

    #[test]
    fn test_email_with_space_rejected() {
        let report = validator().validate(&record("user name@example.com", "Abcdef1!", "Abcdef1!"));
        assert_eq!(
            report.email.as_ref().unwrap().category,
            ErrorCategory::Format
        );
    }

    #[test]
    fn test_email_without_domain_dot_rejected() {
        let report = validator().validate(&record("user@localhost", "Abcdef1!", "Abcdef1!"));
        assert_eq!(
            report.email.as_ref().unwrap().category,
            ErrorCategory::Format
        );
    }

    #[test]
    fn test_empty_email_reports_required() {
        let report = validator().validate(&record("", "Abcdef1!", "Abcdef1!"));
        assert_eq!(
            report.email.as_ref().unwrap().category,
            ErrorCategory::Required
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        let report = validator().validate(&record("user@example.com", "Passw0rd!", "Passw0rd"));

        let err = report.password_confirm.as_ref().unwrap();
        assert_eq!(err.category, ErrorCategory::Mismatch);
        // The password itself satisfied the policy.
        assert!(report.password.is_none());
    }

    #[test]
    fn test_empty_confirmation_reports_required() {
        let report = validator().validate(&record("user@example.com", "Abcdef1!", ""));
        assert_eq!(
            report.password_confirm.as_ref().unwrap().category,
            ErrorCategory::Required
        );
    }

    #[test]
    fn test_confirmation_is_byte_exact() {
        let report = validator().validate(&record("user@example.com", "Abcdef1!", "abcdef1!"));
        assert_eq!(
            report.password_confirm.as_ref().unwrap().category,
            ErrorCategory::Mismatch
        );
    }

    #[test]
    fn test_idempotent_for_identical_records() {
        let v = validator();
        let rec = record("user@example", "abc", "abd");

        let first = v.validate(&rec);
        let second = v.validate(&rec);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_policy_order_drives_surfaced_error() {
        // Symbol ahead of length: both fail, symbol's message wins.
        let policy = PasswordPolicy::builder()
            .symbols("#?!@$%^&*-")
            .min_length(8)
            .build()
            .unwrap();
        let v = SignupValidator::new(policy);

        let report = v.validate(&record("user@example.com", "abc", "abc"));
        assert_eq!(
            report.password.as_ref().unwrap().category,
            ErrorCategory::Symbol
        );
        assert_eq!(report.password_rules.len(), 2);
    }

    #[test]
    fn test_custom_symbol_set() {
        let policy = PasswordPolicy::builder()
            .min_length(4)
            .symbols("._")
            .build()
            .unwrap();
        let v = SignupValidator::new(policy);

        assert!(v
            .validate(&record("user@example.com", "abcd_", "abcd_"))
            .is_valid());
        assert!(!v
            .validate(&record("user@example.com", "abcd#", "abcd#"))
            .is_valid());
    }

    #[test]
    fn test_empty_policy_accepts_any_password() {
        let v = SignupValidator::new(PasswordPolicy::new(vec![]).unwrap());
        let report = v.validate(&record("user@example.com", "", "x"));

        assert!(report.password.is_none());
        assert!(report.password_rules.is_empty());
        // Confirmation still applies independently of password rules.
        assert!(report.password_confirm.is_some());
    }

    #[test]
    fn test_outcomes_follow_policy_order() {
        let policy = PasswordPolicy::new(vec![
            PasswordRule::Digit,
            PasswordRule::MinLength { min: 8 },
        ])
        .unwrap();
        let v = SignupValidator::new(policy);

        let report = v.validate(&record("user@example.com", "Abcdef1!", "Abcdef1!"));
        let kinds: Vec<RuleKind> = report.password_rules.iter().map(|o| o.rule).collect();
        assert_eq!(kinds, vec![RuleKind::Numeric, RuleKind::Length]);
    }
}
