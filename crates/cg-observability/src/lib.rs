//! # cg-observability
//!
//! Logging, journal, and metrics infrastructure for credgate.
//!
//! This crate provides structured logging with tracing, a bounded
//! in-memory journal of validation submissions, and counters summarizing
//! validation outcomes. Passwords never enter any of it; journal entries
//! carry only the email, the verdict, and the identifiers of failed rules.

pub mod journal;
pub mod logging;
pub mod metrics;

pub use journal::{SubmissionJournal, SubmissionRecord};
pub use logging::init_logging;
pub use metrics::{ValidationMetrics, ValidationSummary};
