//! # cg-policy
//!
//! Password policy and signup validation engine for credgate.
//!
//! This crate defines the password rule predicates, the ordered
//! [`PasswordPolicy`] they form, the [`SignupValidator`] that evaluates a
//! signup record against a policy, and the YAML policy file loader.

pub mod config;
pub mod engine;
pub mod policy;
pub mod rules;

pub use config::{load_policy, ConfigError, PolicyFileConfig};
pub use engine::SignupValidator;
pub use policy::{
    PasswordPolicy, PasswordPolicyBuilder, PolicyError, DEFAULT_MIN_LENGTH, DEFAULT_SYMBOLS,
};
pub use rules::PasswordRule;
