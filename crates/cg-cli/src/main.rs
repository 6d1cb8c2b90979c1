//! credgate CLI
//!
//! Command-line interface for the credgate signup validation engine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::BufRead;
use std::path::{Path, PathBuf};

mod lint;

use cg_core::{SignupRequest, ValidationReport};
use cg_observability::{SubmissionJournal, ValidationMetrics, ValidationSummary};
use cg_policy::{load_policy, PasswordPolicy, SignupValidator};
use lint::PolicyLinter;

#[derive(Parser)]
#[command(name = "credgate")]
#[command(author = "Credgate Team")]
#[command(version)]
#[command(about = "Signup credential validation engine", long_about = None)]
struct Cli {
    /// Policy file path
    #[arg(short, long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate signup credentials
    Check {
        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Password
        #[arg(short = 'P', long)]
        password: Option<String>,

        /// Password confirmation
        #[arg(long)]
        confirm: Option<String>,

        /// Read records from a JSONL file (one JSON object per line)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Write a JSON journal of outcomes to this file
        #[arg(long, value_name = "FILE")]
        journal: Option<PathBuf>,
    },

    /// Inspect and lint password policies
    Policy {
        #[command(subcommand)]
        action: PolicyCommands,
    },
}

#[derive(Subcommand)]
enum PolicyCommands {
    /// Show the effective policy
    Show,

    /// Lint a policy file
    Lint {
        /// Policy file to lint
        #[arg(short, long)]
        policy: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    cg_observability::logging::init_logging_with_config(cg_observability::logging::LoggingConfig {
        level: log_level,
        json_format: cli.format == OutputFormat::Json,
        ..Default::default()
    });

    // Load the policy
    let policy_path = cli.policy.clone().unwrap_or_else(default_policy_path);
    let policy = load_policy(&policy_path).unwrap_or_else(|_| {
        if cli.verbose {
            eprintln!("Using default policy (no policy file found)");
        }
        PasswordPolicy::default()
    });

    // Execute command
    match cli.command {
        Commands::Check {
            email,
            password,
            confirm,
            input,
            journal,
        } => {
            if let Some(input_path) = input {
                cmd_check_batch(&input_path, journal.as_deref(), policy, cli.format)
            } else {
                let (email, password) = match (email, password) {
                    (Some(email), Some(password)) => (email, password),
                    _ => {
                        println!(
                            "{}: provide --email and --password, or --input for batch mode",
                            "Error".red()
                        );
                        std::process::exit(2);
                    }
                };

                let record =
                    SignupRequest::new(email, password, confirm.unwrap_or_default());
                cmd_check(record, journal.as_deref(), policy, cli.format)
            }
        }
        Commands::Policy { action } => match action {
            PolicyCommands::Show => cmd_policy_show(policy, cli.format),
            PolicyCommands::Lint { policy: lint_path } => {
                cmd_policy_lint(lint_path.unwrap_or(policy_path))
            }
        },
    }
}

fn default_policy_path() -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("com", "credgate", "credgate") {
        dirs.config_dir().join("policy.yaml")
    } else {
        PathBuf::from("config/policy.yaml")
    }
}

fn cmd_check(
    record: SignupRequest,
    journal_path: Option<&Path>,
    policy: PasswordPolicy,
    format: OutputFormat,
) -> Result<()> {
    let validator = SignupValidator::new(policy);
    let report = validator.validate(&record);

    let journal = SubmissionJournal::default();
    record_outcome(&journal, &record, &report);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(validator.policy(), &report);
    }

    if let Some(path) = journal_path {
        write_journal(&journal, path)?;
    }

    if report.is_valid() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn cmd_check_batch(
    input_path: &Path,
    journal_path: Option<&Path>,
    policy: PasswordPolicy,
    format: OutputFormat,
) -> Result<()> {
    let file = std::fs::File::open(input_path)
        .with_context(|| format!("Failed to open input file: {}", input_path.display()))?;
    let reader = std::io::BufReader::new(file);

    let validator = SignupValidator::new(policy);
    let journal = SubmissionJournal::default();
    let metrics = ValidationMetrics::new();
    let mut parse_errors = 0usize;
    let mut results: Vec<serde_json::Value> = Vec::new();

    if format == OutputFormat::Text {
        println!("{}", "Checking records...".cyan());
        println!();
    }

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("Failed to read line {} of {}", index + 1, input_path.display())
        })?;
        let line_no = index + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: SignupRequest = match serde_json::from_str(trimmed) {
            Ok(record) => record,
            Err(e) => {
                parse_errors += 1;
                tracing::warn!(line = line_no, error = %e, "Skipping unparseable record");
                if format == OutputFormat::Text {
                    println!("  {} line {}: {}", "✗".red(), line_no, e);
                } else {
                    results.push(serde_json::json!({
                        "line": line_no,
                        "error": e.to_string(),
                    }));
                }
                continue;
            }
        };

        let span = cg_observability::submission_span!(record.email);
        let _guard = span.enter();

        let report = validator.validate(&record);
        record_outcome(&journal, &record, &report);

        if format == OutputFormat::Json {
            results.push(batch_record_json(line_no, &record, &report));
        }

        if report.is_valid() {
            metrics.record_accepted();
            if format == OutputFormat::Text {
                println!("  {} line {}: {}", "✓".green(), line_no, record.email);
            }
        } else {
            let failed: Vec<String> = report
                .failed_rules()
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect();
            metrics.record_rejected(&failed, report.email.is_some(), report.password_confirm.is_some());

            if format == OutputFormat::Text {
                let mut reasons = Vec::new();
                if report.email.is_some() {
                    reasons.push("email".to_string());
                }
                reasons.extend(failed);
                if report.password_confirm.is_some() {
                    reasons.push("confirm".to_string());
                }
                println!(
                    "  {} line {}: {} [{}]",
                    "✗".red(),
                    line_no,
                    record.email,
                    reasons.join(", ")
                );
            }
        }
    }

    let summary = metrics.summary();

    if format == OutputFormat::Json {
        let batch = batch_json(results, parse_errors, &summary);
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        println!();
        println!("{}", "Batch Summary".bold());
        println!("─────────────");
        println!("  Checked: {}", summary.submissions_checked);
        println!("  Accepted: {}", summary.accepted.to_string().green());
        println!("  Rejected: {}", summary.rejected.to_string().red());
        if parse_errors > 0 {
            println!("  Unparseable lines: {}", parse_errors.to_string().red());
        }
        println!("  Acceptance rate: {:.1}%", summary.acceptance_rate * 100.0);
        if !summary.rule_failures.is_empty() {
            println!();
            println!("{}", "Failures by Rule".bold());
            let mut failures: Vec<_> = summary.rule_failures.iter().collect();
            failures.sort();
            for (rule, count) in failures {
                println!("  {}: {}", rule, count);
            }
        }
        if summary.email_failures > 0 {
            println!("  email errors: {}", summary.email_failures);
        }
        if summary.confirm_failures > 0 {
            println!("  confirmation errors: {}", summary.confirm_failures);
        }
    }

    if let Some(path) = journal_path {
        write_journal(&journal, path)?;
        if format == OutputFormat::Text {
            println!();
            println!("Journal written to {}", path.display().to_string().cyan());
        }
    }

    if summary.rejected > 0 || parse_errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Adds one validated record to the journal, which mirrors it to the log.
/// Only the email and the outcome are recorded; passwords stay out.
fn record_outcome(journal: &SubmissionJournal, record: &SignupRequest, report: &ValidationReport) {
    if report.is_valid() {
        journal.record_accepted(&record.email);
    } else {
        let failed: Vec<String> = report
            .failed_rules()
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect();
        journal.record_rejected(
            &record.email,
            failed,
            report.email.is_some(),
            report.password_confirm.is_some(),
        );
    }
}

fn write_journal(journal: &SubmissionJournal, path: &Path) -> Result<()> {
    std::fs::write(path, journal.export_json())
        .with_context(|| format!("Failed to write journal to {}", path.display()))
}

/// JSON value for one batch record, embedding the full report.
fn batch_record_json(
    line_no: usize,
    record: &SignupRequest,
    report: &ValidationReport,
) -> serde_json::Value {
    serde_json::json!({
        "line": line_no,
        "email": record.email,
        "accepted": report.is_valid(),
        "report": report,
    })
}

/// The whole batch as one JSON document: per-record results, then totals.
fn batch_json(
    records: Vec<serde_json::Value>,
    parse_errors: usize,
    summary: &ValidationSummary,
) -> serde_json::Value {
    serde_json::json!({
        "records": records,
        "parse_errors": parse_errors,
        "summary": summary,
    })
}

fn print_report(policy: &PasswordPolicy, report: &ValidationReport) {
    println!("{}", "Password Rules".bold());
    println!("──────────────");
    for (rule, outcome) in policy.rules().iter().zip(&report.password_rules) {
        if outcome.satisfied {
            println!("  {} {}", "✓".green(), rule.label());
        } else {
            println!("  {} {}", "✗".red(), rule.label());
        }
    }

    let field_errors = [
        ("email", &report.email),
        ("password", &report.password),
        ("password_confirm", &report.password_confirm),
    ];

    if field_errors.iter().any(|(_, error)| error.is_some()) {
        println!();
        println!("{}", "Field Errors".bold());
        println!("────────────");
        for (field, error) in field_errors {
            if let Some(error) = error {
                println!("  {} {}: {}", "✗".red(), field, error.message);
            }
        }
    }

    println!();
    if report.is_valid() {
        println!("{}", "Signup credentials are valid.".green().bold());
    } else {
        println!(
            "{}",
            "Signup validation failed. Fix the errors above.".red().bold()
        );
    }
}

fn cmd_policy_show(policy: PasswordPolicy, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&policy)?);
        return Ok(());
    }

    println!("{}", "Effective Policy".bold());
    println!("────────────────");
    if policy.is_empty() {
        println!("  No rules configured; every password is accepted");
        return Ok(());
    }

    for rule in policy.rules() {
        println!("  - {}: {}", rule.kind().to_string().cyan(), rule.label());
    }

    println!();
    if let Some(min) = policy.min_length() {
        println!("Minimum length: {}", min);
    }
    if let Some(symbols) = policy.symbols() {
        println!("Symbol set: {}", symbols);
    }

    Ok(())
}

fn cmd_policy_lint(path: PathBuf) -> Result<()> {
    println!(
        "Linting policy: {}",
        path.display().to_string().cyan()
    );

    let report = PolicyLinter::lint_file(&path);
    report.print();

    println!();
    if report.has_errors() {
        println!(
            "{}",
            "Policy lint failed. Fix the errors above.".red().bold()
        );
        std::process::exit(1);
    } else if report.has_warnings() {
        println!(
            "{}",
            "Policy is loadable with warnings. Review the warnings above."
                .yellow()
                .bold()
        );
    } else {
        println!("{}", "Policy is valid.".green().bold());
    }

    Ok(())
}
