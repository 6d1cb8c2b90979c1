//! Email address validation for signup records.
//!
//! [`ValidatedEmail`] wraps an address that passed structural validation:
//! exactly one `@`, a non-empty local part and domain, a dotted domain, and
//! only characters RFC 5321 permits. Input is trimmed and lowercased before
//! validation, so two spellings of the same address compare equal.
//!
//! Validation is purely structural. No DNS lookup or other I/O happens here;
//! whether the mailbox exists is not this crate's concern.

use crate::report::ErrorCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of an email address per RFC 5321.
const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum length of the local part (before @).
const MAX_LOCAL_PART_LENGTH: usize = 64;
/// Maximum length of the domain part (after @).
const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length of a single domain label.
const MAX_LABEL_LENGTH: usize = 63;

/// Reasons an email address fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    #[error("Email address is empty")]
    Empty,

    #[error("Email address exceeds maximum length of {MAX_EMAIL_LENGTH} characters")]
    TooLong,

    #[error("Email address missing '@' symbol")]
    MissingAtSymbol,

    #[error("Email address contains multiple '@' symbols")]
    MultipleAtSymbols,

    #[error("Local part (before @) is empty")]
    EmptyLocalPart,

    #[error("Local part exceeds maximum length of {MAX_LOCAL_PART_LENGTH} characters")]
    LocalPartTooLong,

    #[error("Domain part (after @) is empty")]
    EmptyDomain,

    #[error("Domain exceeds maximum length of {MAX_DOMAIN_LENGTH} characters")]
    DomainTooLong,

    #[error("Domain label exceeds maximum length of {MAX_LABEL_LENGTH} characters")]
    LabelTooLong,

    #[error("Invalid character in local part: '{0}'")]
    InvalidLocalChar(char),

    #[error("Invalid character in domain: '{0}'")]
    InvalidDomainChar(char),

    #[error("Domain must contain at least one dot")]
    MissingDomainDot,

    #[error("Dot at the start or end of a part is not allowed")]
    MisplacedDot,

    #[error("Consecutive dots are not allowed")]
    ConsecutiveDots,

    #[error("Domain label cannot start or end with a hyphen")]
    MisplacedHyphen,
}

impl EmailValidationError {
    /// Maps this failure onto the field-error category the report uses.
    ///
    /// An empty input is a missing required field; every structural
    /// failure of a non-empty input is a format problem.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EmailValidationError::Empty => ErrorCategory::Required,
            _ => ErrorCategory::Format,
        }
    }
}

/// A validated, normalized email address.
///
/// Instances can only be built through validation, so holding a
/// `ValidatedEmail` is proof the address is structurally sound. The stored
/// form is trimmed and lowercased.
///
/// # Example
///
/// ```
/// use cg_core::validation::email::ValidatedEmail;
///
/// let email = ValidatedEmail::new("User@Example.COM").expect("valid email");
/// assert_eq!(email.as_str(), "user@example.com");
/// assert_eq!(email.local_part(), "user");
/// assert_eq!(email.domain(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidatedEmail {
    /// The normalized address.
    email: String,
    /// Index of the @ symbol for cheap part access.
    at_index: usize,
}

impl ValidatedEmail {
    /// Validates `email` and returns the normalized address.
    ///
    /// # Example
    ///
    /// ```
    /// use cg_core::validation::email::ValidatedEmail;
    ///
    /// assert!(ValidatedEmail::new("user@example.com").is_ok());
    /// assert!(ValidatedEmail::new("not-an-email").is_err());
    /// ```
    pub fn new(email: &str) -> Result<Self, EmailValidationError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(EmailValidationError::Empty);
        }

        if email.len() > MAX_EMAIL_LENGTH {
            return Err(EmailValidationError::TooLong);
        }

        let at_index = match email.match_indices('@').collect::<Vec<_>>().as_slice() {
            [] => return Err(EmailValidationError::MissingAtSymbol),
            [(idx, _)] => *idx,
            _ => return Err(EmailValidationError::MultipleAtSymbols),
        };

        Self::validate_local_part(&email[..at_index])?;
        Self::validate_domain(&email[at_index + 1..])?;

        // Everything validated is ASCII, so lowercasing keeps at_index stable.
        Ok(ValidatedEmail {
            email: email.to_lowercase(),
            at_index,
        })
    }

    fn validate_local_part(local: &str) -> Result<(), EmailValidationError> {
        if local.is_empty() {
            return Err(EmailValidationError::EmptyLocalPart);
        }

        if local.len() > MAX_LOCAL_PART_LENGTH {
            return Err(EmailValidationError::LocalPartTooLong);
        }

        if local.starts_with('.') || local.ends_with('.') {
            return Err(EmailValidationError::MisplacedDot);
        }

        if local.contains("..") {
            return Err(EmailValidationError::ConsecutiveDots);
        }

        for c in local.chars() {
            if !Self::is_valid_local_char(c) {
                return Err(EmailValidationError::InvalidLocalChar(c));
            }
        }

        Ok(())
    }

    fn validate_domain(domain: &str) -> Result<(), EmailValidationError> {
        if domain.is_empty() {
            return Err(EmailValidationError::EmptyDomain);
        }

        if domain.len() > MAX_DOMAIN_LENGTH {
            return Err(EmailValidationError::DomainTooLong);
        }

        if !domain.contains('.') {
            return Err(EmailValidationError::MissingDomainDot);
        }

        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailValidationError::MisplacedDot);
        }

        if domain.contains("..") {
            return Err(EmailValidationError::ConsecutiveDots);
        }

        for label in domain.split('.') {
            Self::validate_label(label)?;
        }

        Ok(())
    }

    fn validate_label(label: &str) -> Result<(), EmailValidationError> {
        if label.len() > MAX_LABEL_LENGTH {
            return Err(EmailValidationError::LabelTooLong);
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(EmailValidationError::MisplacedHyphen);
        }

        for c in label.chars() {
            if !Self::is_valid_domain_char(c) {
                return Err(EmailValidationError::InvalidDomainChar(c));
            }
        }

        Ok(())
    }

    /// RFC 5321 atext: alphanumerics plus a fixed set of specials. Dots are
    /// allowed too since position and repetition were already checked.
    fn is_valid_local_char(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '.' | '!'
                    | '#'
                    | '$'
                    | '%'
                    | '&'
                    | '\''
                    | '*'
                    | '+'
                    | '-'
                    | '/'
                    | '='
                    | '?'
                    | '^'
                    | '_'
                    | '`'
                    | '{'
                    | '|'
                    | '}'
                    | '~'
            )
    }

    /// Domain labels allow alphanumerics and interior hyphens.
    fn is_valid_domain_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-'
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.email
    }

    /// Returns the local part (before @).
    pub fn local_part(&self) -> &str {
        &self.email[..self.at_index]
    }

    /// Returns the domain part (after @).
    pub fn domain(&self) -> &str {
        &self.email[self.at_index + 1..]
    }

    /// Consumes the wrapper and returns the underlying String.
    pub fn into_string(self) -> String {
        self.email
    }
}

impl fmt::Display for ValidatedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

impl AsRef<str> for ValidatedEmail {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

impl FromStr for ValidatedEmail {
    type Err = EmailValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidatedEmail::new(s)
    }
}

impl TryFrom<String> for ValidatedEmail {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ValidatedEmail::new(&value)
    }
}

impl TryFrom<&str> for ValidatedEmail {
    type Error = EmailValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ValidatedEmail::new(value)
    }
}

impl From<ValidatedEmail> for String {
    fn from(email: ValidatedEmail) -> String {
        email.email
    }
}

/// Validates an email address without keeping the wrapper around.
///
/// # Example
///
/// ```
/// use cg_core::validation::email::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<ValidatedEmail, EmailValidationError> {
    ValidatedEmail::new(email)
}
