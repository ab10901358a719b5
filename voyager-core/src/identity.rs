//! Player identity: email normalization, login validation and passport codes.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Default upper bound for display names.
pub const NAME_MAX_LEN: usize = 80;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter your name")]
    EmptyName,
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Trimmed, lower-cased email. The sole key for every store lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalize and validate a raw email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] when the normalized value is
    /// not of the form `local@domain.tld`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_email(raw);
        let valid = EMAIL_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&normalized));
        if valid {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validated login form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: Email,
    pub name: String,
}

impl Credentials {
    /// Validate the login form before any network call.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the email first.
    pub fn parse(email: &str, name: &str, name_max_len: usize) -> Result<Self, ValidationError> {
        let email = Email::parse(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > name_max_len {
            return Err(ValidationError::NameTooLong { max: name_max_len });
        }
        Ok(Self {
            email,
            name: name.to_string(),
        })
    }
}

/// Six-digit passport code derived from a normalized email.
///
/// Mirrors the hash used when accounts were first issued so existing
/// passports keep their codes: a 32-bit FNV-style mix over UTF-16 units whose
/// final sum is left unwrapped before the modulo.
#[must_use]
pub fn passport_code(email: &Email) -> String {
    let mut hash: i64 = 2_166_136_261;
    for unit in email.as_str().encode_utf16() {
        #[allow(clippy::cast_possible_truncation)]
        let mixed = (hash as i32) ^ i32::from(unit);
        hash = i64::from(mixed)
            + i64::from(mixed.wrapping_shl(1))
            + i64::from(mixed.wrapping_shl(4))
            + i64::from(mixed.wrapping_shl(7))
            + i64::from(mixed.wrapping_shl(8))
            + i64::from(mixed.wrapping_shl(24));
    }
    let code = (hash % 1_000_000).abs();
    format!("{code:06}")
}
