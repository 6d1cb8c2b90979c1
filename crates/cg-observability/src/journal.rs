//! Submission journal for credgate.
//!
//! Keeps a bounded in-memory trail of validation outcomes so that operators
//! can answer "what did we reject, and why" after the fact. Passwords are
//! never stored; a record carries only the email, the verdict, and the
//! identifiers of the rules that failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};
use tracing::info;
use uuid::Uuid;

/// One validated submission, as remembered by the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Unique record ID.
    pub id: Uuid,
    /// Timestamp.
    pub timestamp: DateTime<Utc>,
    /// The email on the submission. May be empty or malformed; it is stored
    /// as submitted so that rejections remain searchable.
    pub email: String,
    /// Whether the submission passed validation.
    pub accepted: bool,
    /// Identifiers of the password rules that failed, in policy order.
    pub failed_rules: Vec<String>,
    /// Whether the email field had an error.
    pub email_failed: bool,
    /// Whether the confirmation field had an error.
    pub confirm_failed: bool,
}

impl SubmissionRecord {
    /// Creates a record for an accepted submission.
    pub fn accepted(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            email: email.into(),
            accepted: true,
            failed_rules: Vec::new(),
            email_failed: false,
            confirm_failed: false,
        }
    }

    /// Creates a record for a rejected submission.
    pub fn rejected(
        email: impl Into<String>,
        failed_rules: Vec<String>,
        email_failed: bool,
        confirm_failed: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            email: email.into(),
            accepted: false,
            failed_rules,
            email_failed,
            confirm_failed,
        }
    }
}

/// Bounded journal of submission records with in-memory storage.
pub struct SubmissionJournal {
    /// In-memory records, oldest first.
    entries: RwLock<VecDeque<SubmissionRecord>>,
    /// Maximum records to keep in memory.
    max_entries: usize,
    /// Whether to also log to tracing.
    log_to_tracing: bool,
}

impl SubmissionJournal {
    /// Creates a new journal.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries,
            log_to_tracing: true,
        }
    }

    /// Creates a journal without tracing output.
    pub fn without_tracing(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries,
            log_to_tracing: false,
        }
    }

    /// Records a submission outcome.
    pub fn record(&self, record: SubmissionRecord) {
        if self.log_to_tracing {
            info!(
                email = %record.email,
                accepted = record.accepted,
                failed_rules = ?record.failed_rules,
                "Submission {}",
                if record.accepted { "accepted" } else { "rejected" }
            );
        }

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(record);
    }

    /// Records an accepted submission.
    pub fn record_accepted(&self, email: &str) {
        self.record(SubmissionRecord::accepted(email));
    }

    /// Records a rejected submission.
    pub fn record_rejected(
        &self,
        email: &str,
        failed_rules: Vec<String>,
        email_failed: bool,
        confirm_failed: bool,
    ) {
        self.record(SubmissionRecord::rejected(
            email,
            failed_rules,
            email_failed,
            confirm_failed,
        ));
    }

    /// Gets all records, oldest first.
    pub fn entries(&self) -> Vec<SubmissionRecord> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    /// Gets records for a specific email.
    pub fn entries_for_email(&self, email: &str) -> Vec<SubmissionRecord> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .filter(|e| e.email == email)
            .cloned()
            .collect()
    }

    /// Gets records within a time range.
    pub fn entries_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<SubmissionRecord> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .cloned()
            .collect()
    }

    /// Gets only the rejected records.
    pub fn rejections(&self) -> Vec<SubmissionRecord> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().filter(|e| !e.accepted).cloned().collect()
    }

    /// Exports records as JSON.
    pub fn export_json(&self) -> String {
        let entries = self.entries();
        serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Gets the number of records.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Checks if the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Clears all records.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for SubmissionJournal {
    fn default() -> Self {
        Self::new(10000)
    }
}
