//! Integration tests for the signup validation engine.
//!
//! These tests exercise the full validate path the way a signup form would:
//! a record per keystroke, the complete rule checklist on every call, and
//! the first failing rule supplying the visible message.
//!
//! # Running these tests
//!
//! ```bash
//! cargo test --test validator_integration_tests
//! ```

use cg_core::report::{ErrorCategory, RuleKind};
use cg_core::SignupRequest;
use cg_policy::{PasswordPolicy, SignupValidator};

fn validator() -> SignupValidator {
    SignupValidator::with_default_policy()
}

#[test]
fn test_fully_valid_signup_accepted() {
    let report = validator().validate(&SignupRequest::new(
        "user@example.com",
        "Abcdef1!",
        "Abcdef1!",
    ));

    assert!(report.is_valid());
    assert_eq!(report.password_rules.len(), 4);
    assert!(report.password_rules.iter().all(|o| o.satisfied));
}

#[test]
fn test_short_password_keeps_full_checklist() {
    // "short" also misses a digit, a symbol, and an uppercase letter. The
    // visible error is the length message, but every outcome is reported.
    let report = validator().validate(&SignupRequest::new("user@example.com", "short", "short"));

    let err = report.password.as_ref().expect("password error");
    assert_eq!(err.category, ErrorCategory::Length);

    assert!(!report.outcome(RuleKind::Length).unwrap().satisfied);
    assert!(!report.outcome(RuleKind::Case).unwrap().satisfied);
    assert!(!report.outcome(RuleKind::Numeric).unwrap().satisfied);
    assert!(!report.outcome(RuleKind::Symbol).unwrap().satisfied);
}

#[test]
fn test_checklist_updates_as_password_grows() {
    // A user typing toward a valid password, one snapshot per keystroke.
    let v = validator();
    let keystrokes = [
        ("a", 4),
        ("abcdefgh", 3),
        ("Abcdefgh", 2),
        ("Abcdefg1", 1),
        ("Abcdefg1!", 0),
    ];

    for (password, expected_failures) in keystrokes {
        let report = v.validate(&SignupRequest::new("user@example.com", password, ""));
        assert_eq!(
            report.failed_rules().len(),
            expected_failures,
            "unexpected failure count for {:?}",
            password
        );
    }
}

#[test]
fn test_surfaced_error_follows_priority_order() {
    let v = validator();

    // Long enough and mixed case, missing digit and symbol: numeric wins.
    let report = v.validate(&SignupRequest::new(
        "user@example.com",
        "Abcdefgh",
        "Abcdefgh",
    ));
    assert_eq!(
        report.password.as_ref().unwrap().category,
        ErrorCategory::Numeric
    );

    // Only the symbol missing: symbol message surfaces.
    let report = v.validate(&SignupRequest::new(
        "user@example.com",
        "Abcdefg1",
        "Abcdefg1",
    ));
    assert_eq!(
        report.password.as_ref().unwrap().category,
        ErrorCategory::Symbol
    );
}

#[test]
fn test_mismatch_reported_alongside_clean_password() {
    let report = validator().validate(&SignupRequest::new(
        "user@example.com",
        "Passw0rd!",
        "Passw0rd",
    ));

    assert!(report.password.is_none());
    assert_eq!(
        report.password_confirm.as_ref().unwrap().category,
        ErrorCategory::Mismatch
    );
}

#[test]
fn test_all_fields_fail_independently() {
    let report = validator().validate(&SignupRequest::new("not-an-email", "weak", "different"));

    assert_eq!(
        report.email.as_ref().unwrap().category,
        ErrorCategory::Format
    );
    assert_eq!(
        report.password.as_ref().unwrap().category,
        ErrorCategory::Length
    );
    assert_eq!(
        report.password_confirm.as_ref().unwrap().category,
        ErrorCategory::Mismatch
    );
}

#[test]
fn test_empty_record_reports_required_fields() {
    let report = validator().validate(&SignupRequest::new("", "", ""));

    assert_eq!(
        report.email.as_ref().unwrap().category,
        ErrorCategory::Required
    );
    assert_eq!(
        report.password_confirm.as_ref().unwrap().category,
        ErrorCategory::Required
    );
    // The empty password fails the whole checklist; length is surfaced.
    assert_eq!(
        report.password.as_ref().unwrap().category,
        ErrorCategory::Length
    );
    assert_eq!(report.failed_rules().len(), 4);
}

#[test]
fn test_validation_is_idempotent() {
    let v = validator();
    let record = SignupRequest::new("user@example", "abc", "abd");

    let reports: Vec<_> = (0..3).map(|_| v.validate(&record)).collect();
    assert_eq!(reports[0], reports[1]);
    assert_eq!(reports[1], reports[2]);
}

#[test]
fn test_validator_shareable_across_threads() {
    let v = std::sync::Arc::new(validator());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let v = v.clone();
            std::thread::spawn(move || {
                let password = format!("Abcdef{}!", i);
                let report = v.validate(&SignupRequest::new(
                    "user@example.com",
                    &password,
                    &password,
                ));
                assert!(report.is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_tuned_policy_changes_outcome() {
    let strict = PasswordPolicy::builder()
        .min_length(12)
        .mixed_case()
        .digit()
        .symbols("#?!@$%^&*-")
        .build()
        .unwrap();
    let v = SignupValidator::new(strict);

    // Valid under the stock policy, too short under this one.
    let report = v.validate(&SignupRequest::new(
        "user@example.com",
        "Abcdef1!",
        "Abcdef1!",
    ));
    assert_eq!(
        report.password.as_ref().unwrap().category,
        ErrorCategory::Length
    );
    assert!(report
        .password
        .as_ref()
        .unwrap()
        .message
        .contains("12"));
}

#[test]
fn test_email_normalized_before_validation() {
    // Mixed case and padding are accepted; structure is still enforced.
    let v = validator();

    assert!(v
        .validate(&SignupRequest::new(
            "  User@Example.COM  ",
            "Abcdef1!",
            "Abcdef1!"
        ))
        .is_valid());
    assert!(!v
        .validate(&SignupRequest::new(
            "User@@example.com",
            "Abcdef1!",
            "Abcdef1!"
        ))
        .is_valid());
}
