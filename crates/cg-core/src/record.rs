//! Signup record type for credgate.
//!
//! A [`SignupRequest`] carries the raw values a user submitted on the signup
//! form. It is transient: callers build one per change event, hand it to the
//! validator, and discard it. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate signup submission awaiting validation.
///
/// The `Debug` implementation redacts both password fields so that records
/// can be logged safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Email address as entered.
    pub email: String,
    /// Password as entered.
    pub password: String,
    /// Password confirmation as entered.
    #[serde(default, alias = "passwordConfirm")]
    pub password_confirm: String,
}

impl SignupRequest {
    /// Creates a signup request from the three raw form values.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .finish()
    }
}
