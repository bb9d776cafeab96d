//! Name value object.

use super::errors::{DomainError, DomainResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\s'-]+$").expect("Failed to compile name regex"));

static LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}").expect("Failed to compile letter regex"));

#[derive(Debug, Clone, Copy)]
enum NamePart {
    First,
    Last,
}

impl NamePart {
    fn label(self) -> &'static str {
        match self {
            Self::First => "First name",
            Self::Last => "Last name",
        }
    }
}

/// A person's first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NameFields")]
pub struct Name {
    firstname: String,
    lastname: String,
}

#[derive(Deserialize)]
struct NameFields {
    firstname: String,
    lastname: String,
}

impl TryFrom<NameFields> for Name {
    type Error = DomainError;

    fn try_from(fields: NameFields) -> Result<Self, Self::Error> {
        Name::new(fields.firstname, fields.lastname)
    }
}

impl Name {
    /// Create a new Name.
    ///
    /// Each part must contain at least one letter, only letters, spaces,
    /// apostrophes and hyphens, and be at least 3 characters long.
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> DomainResult<Self> {
        let firstname = firstname.into();
        let lastname = lastname.into();
        validate_part(&firstname, NamePart::First)?;
        validate_part(&lastname, NamePart::Last)?;

        Ok(Self {
            firstname,
            lastname,
        })
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn with_firstname(&self, firstname: impl Into<String>) -> DomainResult<Self> {
        let firstname = firstname.into();
        validate_part(&firstname, NamePart::First)?;

        Ok(Self {
            firstname,
            lastname: self.lastname.clone(),
        })
    }

    pub fn with_lastname(&self, lastname: impl Into<String>) -> DomainResult<Self> {
        let lastname = lastname.into();
        validate_part(&lastname, NamePart::Last)?;

        Ok(Self {
            firstname: self.firstname.clone(),
            lastname,
        })
    }
}

fn validate_part(name: &str, part: NamePart) -> DomainResult<()> {
    if !NAME_CHARS.is_match(name) || !LETTER.is_match(name) {
        return Err(DomainError::validation(format!(
            "{} given [{}] contains invalid characters.",
            part.label(),
            name
        )));
    }
    if name.chars().count() < 3 {
        return Err(DomainError::validation(format!(
            "{} given [{}] must be at least 3 characters long.",
            part.label(),
            name
        )));
    }
    Ok(())
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            upper_first(&self.firstname),
            upper_first(&self.lastname)
        )
    }
}
