//! # cg-core
//!
//! Core data model for credgate.
//!
//! This crate provides the signup record type, the structured validation
//! report returned by the policy engine, and validated field types.

pub mod record;
pub mod report;
pub mod validation;

pub use record::SignupRequest;
pub use report::{ErrorCategory, FieldError, RuleKind, RuleOutcome, ValidationReport};
pub use validation::{validate_email, EmailValidationError, ValidatedEmail};
