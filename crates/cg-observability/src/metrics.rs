//! Metrics collection for credgate.
//!
//! This module provides metrics collection using the metrics crate
//! with Prometheus export support.

use metrics::{counter, describe_counter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Aggregate view of validation outcomes since startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Total submissions checked.
    pub submissions_checked: u64,
    /// Submissions that passed every check.
    pub accepted: u64,
    /// Submissions with at least one error.
    pub rejected: u64,
    /// Fraction of submissions accepted.
    pub acceptance_rate: f64,
    /// Submissions with an email error.
    pub email_failures: u64,
    /// Submissions with a confirmation error.
    pub confirm_failures: u64,
    /// Password rule failures by rule identifier.
    pub rule_failures: HashMap<String, u64>,
}

/// Metrics collector for the validation engine.
pub struct ValidationMetrics {
    /// Total submissions checked.
    checked: AtomicU64,
    /// Accepted count.
    accepted: AtomicU64,
    /// Rejected count.
    rejected: AtomicU64,
    /// Email failure count.
    email_failures: AtomicU64,
    /// Confirmation failure count.
    confirm_failures: AtomicU64,
    /// Per-rule failure counts.
    rule_failures: RwLock<HashMap<String, u64>>,
}

impl ValidationMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        // Register metric descriptions
        Self::register_metrics();

        Self {
            checked: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            email_failures: AtomicU64::new(0),
            confirm_failures: AtomicU64::new(0),
            rule_failures: RwLock::new(HashMap::new()),
        }
    }

    /// Registers metric descriptions.
    fn register_metrics() {
        describe_counter!(
            "cg_submissions_checked_total",
            "Total number of submissions checked"
        );
        describe_counter!(
            "cg_submissions_accepted_total",
            "Total number of submissions that passed validation"
        );
        describe_counter!(
            "cg_submissions_rejected_total",
            "Total number of submissions with at least one error"
        );
        describe_counter!(
            "cg_rule_failures_total",
            "Total number of password rule failures"
        );
        describe_counter!(
            "cg_field_errors_total",
            "Total number of field-level errors"
        );
    }

    /// Records an accepted submission.
    pub fn record_accepted(&self) {
        counter!("cg_submissions_checked_total").increment(1);
        counter!("cg_submissions_accepted_total").increment(1);

        self.checked.fetch_add(1, Ordering::Relaxed);
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rejected submission with the rules and fields that failed.
    pub fn record_rejected(
        &self,
        failed_rules: &[String],
        email_failed: bool,
        confirm_failed: bool,
    ) {
        counter!("cg_submissions_checked_total").increment(1);
        counter!("cg_submissions_rejected_total").increment(1);

        self.checked.fetch_add(1, Ordering::Relaxed);
        self.rejected.fetch_add(1, Ordering::Relaxed);

        for rule in failed_rules {
            counter!("cg_rule_failures_total", "rule" => rule.clone()).increment(1);
        }
        if !failed_rules.is_empty() {
            let mut counts = self
                .rule_failures
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            for rule in failed_rules {
                *counts.entry(rule.clone()).or_insert(0) += 1;
            }
        }

        if email_failed {
            counter!("cg_field_errors_total", "field" => "email").increment(1);
            self.email_failures.fetch_add(1, Ordering::Relaxed);
        }
        if confirm_failed {
            counter!("cg_field_errors_total", "field" => "password_confirm").increment(1);
            self.confirm_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Calculates the current summary.
    pub fn summary(&self) -> ValidationSummary {
        let checked = self.checked.load(Ordering::Relaxed);
        let accepted = self.accepted.load(Ordering::Relaxed);

        let acceptance_rate = if checked > 0 {
            accepted as f64 / checked as f64
        } else {
            0.0
        };

        let rule_failures = self
            .rule_failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        ValidationSummary {
            submissions_checked: checked,
            accepted,
            rejected: self.rejected.load(Ordering::Relaxed),
            acceptance_rate,
            email_failures: self.email_failures.load(Ordering::Relaxed),
            confirm_failures: self.confirm_failures.load(Ordering::Relaxed),
            rule_failures,
        }
    }
}

impl Default for ValidationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
