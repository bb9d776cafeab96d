//! JobTitle value object.

use super::errors::{DomainError, DomainResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static TITLE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alpha:][:space:]-]+$").expect("Failed to compile job title regex")
});

static THREE_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[:alpha:]]{3}").expect("Failed to compile letter run regex"));

/// Title of a job posting, e.g. "Senior Backend Engineer".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobTitle(String);

impl JobTitle {
    /// Create a new JobTitle.
    ///
    /// The title must be longer than 5 characters, made of ASCII letters,
    /// hyphens and spaces, and contain a run of at least 3 letters.
    pub fn new(title: impl Into<String>) -> DomainResult<Self> {
        let title = title.into();

        if title.chars().count() <= 5 {
            return Err(DomainError::validation("The job title is too short."));
        }
        if !TITLE_CHARS.is_match(&title) || !THREE_LETTERS.is_match(&title) {
            return Err(DomainError::validation(
                "The job title provided is not valid.",
            ));
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for JobTitle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JobTitle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        JobTitle::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_title_valid() {
        assert_eq!(
            JobTitle::new("Backend Engineer").unwrap().as_str(),
            "Backend Engineer"
        );
        assert!(JobTitle::new("Full-Stack Developer").is_ok());
    }

    #[test]
    fn test_job_title_too_short() {
        let err = JobTitle::new("Coder").unwrap_err();
        assert_eq!(err.to_string(), "The job title is too short.");
        assert!(JobTitle::new("Coders").is_ok());
    }

    #[test]
    fn test_job_title_invalid_characters() {
        let err = JobTitle::new("C++ Developer").unwrap_err();
        assert_eq!(err.to_string(), "The job title provided is not valid.");
        assert!(JobTitle::new("Dev 2 Ops").is_err());
    }

    #[test]
    fn test_job_title_needs_three_letter_run() {
        assert!(JobTitle::new("ab ab ab").is_err());
        assert!(JobTitle::new("ab abc ab").is_ok());
    }
}
