//! Policy file linting for credgate.
//!
//! This module provides comprehensive checks on a policy file before it is
//! rolled out, split into errors that the loader would reject and warnings
//! about settings that load but weaken the stock rules.

use cg_policy::{PolicyFileConfig, DEFAULT_MIN_LENGTH};
use colored::Colorize;
use std::path::Path;

/// Result of linting a policy file.
#[derive(Debug, Default)]
pub struct LintReport {
    /// Problems the loader rejects.
    pub errors: Vec<String>,
    /// Settings that load but should be reviewed.
    pub warnings: Vec<String>,
}

impl LintReport {
    /// Creates a new empty lint report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Returns true if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Prints the lint report to the console.
    pub fn print(&self) {
        if !self.warnings.is_empty() {
            println!();
            println!("{}", "Policy Warnings:".yellow().bold());
            for warning in &self.warnings {
                println!("  {} {}", "⚠".yellow(), warning);
            }
        }

        if !self.errors.is_empty() {
            println!();
            println!("{}", "Policy Errors:".red().bold());
            for error in &self.errors {
                println!("  {} {}", "✗".red(), error);
            }
        }

        if self.errors.is_empty() && self.warnings.is_empty() {
            println!("  {} Policy OK", "✓".green());
        }
    }
}

/// Lints policy files before rollout.
pub struct PolicyLinter;

impl PolicyLinter {
    /// Reads, parses, and lints a policy file.
    pub fn lint_file(path: &Path) -> LintReport {
        let mut report = LintReport::new();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                report.add_error(format!(
                    "Failed to read policy file '{}': {}",
                    path.display(),
                    e
                ));
                return report;
            }
        };

        let config: PolicyFileConfig = match serde_yaml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                report.add_error(format!(
                    "Failed to parse policy file '{}': {}",
                    path.display(),
                    e
                ));
                return report;
            }
        };

        Self::lint(&config)
    }

    /// Lints a parsed policy file.
    pub fn lint(config: &PolicyFileConfig) -> LintReport {
        let mut report = LintReport::new();

        Self::lint_min_length(config, &mut report);
        Self::lint_symbols(config, &mut report);
        Self::lint_rule_coverage(config, &mut report);

        report
    }

    /// Checks the minimum length setting.
    fn lint_min_length(config: &PolicyFileConfig, report: &mut LintReport) {
        let min = config.password.min_length;

        if min == 0 {
            report.add_error("password.min_length must be at least 1");
        } else if min < DEFAULT_MIN_LENGTH {
            report.add_warning(format!(
                "password.min_length {} is below the recommended minimum of {}. \
                 Short passwords are easy to brute-force.",
                min, DEFAULT_MIN_LENGTH
            ));
        } else if min > 64 {
            report.add_warning(format!(
                "password.min_length {} is unusually high and will frustrate \
                 users. Most guidance suggests 8-64 characters.",
                min
            ));
        }
    }

    /// Checks the symbol set.
    fn lint_symbols(config: &PolicyFileConfig, report: &mut LintReport) {
        let section = &config.password;

        if !section.require_symbol {
            return;
        }

        if section.symbols.is_empty() {
            report.add_error(
                "password.symbols must not be empty when require_symbol is set. \
                 List the accepted symbol characters, e.g. \"#?!@$%^&*-\".",
            );
            return;
        }

        for c in section.symbols.chars() {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                report.add_error(format!(
                    "password.symbols may not contain '{}'. Only punctuation \
                     characters can count as symbols.",
                    c
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for c in section.symbols.chars() {
            if !seen.insert(c) {
                report.add_warning(format!(
                    "password.symbols lists '{}' more than once",
                    c
                ));
            }
        }
    }

    /// Warns when stock rules are switched off.
    fn lint_rule_coverage(config: &PolicyFileConfig, report: &mut LintReport) {
        let section = &config.password;

        if !section.require_mixed_case {
            report.add_warning(
                "Mixed-case rule is disabled. Passwords will not be required \
                 to contain both uppercase and lowercase letters.",
            );
        }
        if !section.require_digit {
            report.add_warning(
                "Digit rule is disabled. Passwords will not be required to \
                 contain a number.",
            );
        }
        if !section.require_symbol {
            report.add_warning(
                "Symbol rule is disabled. Passwords will not be required to \
                 contain a symbol character.",
            );
        }
    }
}
