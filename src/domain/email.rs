//! Email value object.

use super::errors::{DomainError, DomainResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// Dot-atom local part, hostname labels with at least one dot
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("Failed to compile email regex")
});

const MAX_LOCAL_PART: usize = 64;
const MAX_LENGTH: usize = 320;

/// A type-safe wrapper for email addresses.
///
/// Email addresses are checked for a well-formed local part and a
/// hostname domain at construction time. There is no external verification.
///
/// # Example
///
/// ```
/// use job_board_core::domain::Email;
///
/// let email = Email::new("user@example.com").unwrap();
/// assert_eq!(email.as_str(), "user@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new Email, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> DomainResult<Self> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(DomainError::validation(
                "The value given is not a valid email address.",
            ));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        if email.len() > MAX_LENGTH || !EMAIL.is_match(email) {
            return false;
        }

        email
            .split_once('@')
            .is_some_and(|(local, _)| local.len() <= MAX_LOCAL_PART)
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

// Serde support - serialize as string
impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Email::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
