//! Validated field types for credgate.
//!
//! This module provides newtypes that can only be constructed from input
//! that passed validation, so downstream code never handles an unchecked
//! value.
//!
//! # Available Types
//!
//! - [`ValidatedEmail`] - structurally valid, normalized email address

pub mod email;

pub use email::{validate_email, EmailValidationError, ValidatedEmail};
