//! YAML policy file loader for credgate.
//!
//! This module parses the policy file into schema structs, validates the
//! values, and converts them into a [`PasswordPolicy`]. The schema keeps
//! knobs rather than raw rule lists so operators only state what they want
//! enforced:
//!
//! ```yaml
//! password:
//!   min_length: 8
//!   symbols: "#?!@$%^&*-"
//!   require_mixed_case: true
//!   require_digit: true
//!   require_symbol: true
//! ```
//!
//! Rule order is fixed by the loader (length, case, digit, symbol) so a
//! policy file can toggle and tune rules but not reorder them; callers
//! needing a custom order build the policy in code.

use crate::policy::{PasswordPolicy, PolicyError, DEFAULT_MIN_LENGTH, DEFAULT_SYMBOLS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a policy file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML policy: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Invalid policy: {0}")]
    Policy(#[from] PolicyError),
}

/// Top-level policy file schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyFileConfig {
    /// Password rule settings.
    #[serde(default)]
    pub password: PasswordSection,
}

/// Password settings from the policy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordSection {
    /// Minimum password length.
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Accepted symbol characters.
    #[serde(default = "default_symbols")]
    pub symbols: String,

    /// Whether to require both letter cases.
    #[serde(default = "default_true")]
    pub require_mixed_case: bool,

    /// Whether to require a digit.
    #[serde(default = "default_true")]
    pub require_digit: bool,

    /// Whether to require a symbol.
    #[serde(default = "default_true")]
    pub require_symbol: bool,
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_symbols() -> String {
    DEFAULT_SYMBOLS.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PasswordSection {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            symbols: default_symbols(),
            require_mixed_case: true,
            require_digit: true,
            require_symbol: true,
        }
    }
}

impl PolicyFileConfig {
    /// Converts the parsed file into an engine policy.
    pub fn to_policy(&self) -> Result<PasswordPolicy, ConfigError> {
        validate_config(self)?;

        let section = &self.password;
        let mut builder = PasswordPolicy::builder().min_length(section.min_length);

        if section.require_mixed_case {
            builder = builder.mixed_case();
        }
        if section.require_digit {
            builder = builder.digit();
        }
        if section.require_symbol {
            builder = builder.symbols(&section.symbols);
        }

        Ok(builder.build()?)
    }
}

/// Validates the parsed configuration before conversion.
fn validate_config(config: &PolicyFileConfig) -> Result<(), ConfigError> {
    let section = &config.password;

    if section.min_length == 0 {
        return Err(ConfigError::InvalidValue(
            "password.min_length must be at least 1".to_string(),
        ));
    }

    if section.require_symbol {
        if section.symbols.is_empty() {
            return Err(ConfigError::InvalidValue(
                "password.symbols must not be empty when require_symbol is set".to_string(),
            ));
        }

        if let Some(c) = section
            .symbols
            .chars()
            .find(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        {
            return Err(ConfigError::InvalidValue(format!(
                "password.symbols may not contain '{}'",
                c
            )));
        }
    }

    Ok(())
}

/// Loads and converts a policy file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use cg_policy::config::load_policy;
///
/// let policy = load_policy(Path::new("config/policy.yaml")).unwrap();
/// assert_eq!(policy.min_length(), Some(8));
/// ```
pub fn load_policy(path: &Path) -> Result<PasswordPolicy, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: PolicyFileConfig = serde_yaml::from_str(&content)?;
    config.to_policy()
}
