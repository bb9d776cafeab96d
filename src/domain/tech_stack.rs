//! TechStack value object.

use super::errors::{DomainError, DomainResult};
use super::verified::Verified;
use crate::support::validators::is_string_list;
use crate::verifiers::TechnologyCatalog;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const MIN_TECHNOLOGIES: usize = 3;
const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 50;

/// Ordered list of technologies a job uses, stored lower-cased.
///
/// # Example
///
/// ```
/// use job_board_core::domain::TechStack;
///
/// let stack = TechStack::new(["PHP", "Go", "Rust"]).unwrap();
/// let names: Vec<&str> = stack.iter().collect();
/// assert_eq!(names, ["php", "go", "rust"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TechStack(Vec<String>);

impl TechStack {
    /// Create a new TechStack.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if an entry is empty or there are fewer
    ///   than three entries
    /// - `DomainError::RuleViolation` listing every name shorter than 2 or
    ///   longer than 50 characters
    pub fn new<I, S>(stack: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stack: Vec<String> = stack.into_iter().map(Into::into).collect();

        if !is_string_list(&stack) {
            return Err(DomainError::validation(
                "The technology stack must be a list of strings.",
            ));
        }
        if stack.len() < MIN_TECHNOLOGIES {
            return Err(DomainError::validation(
                "The technology stack must contain at least three technologies.",
            ));
        }

        let invalid: Vec<&str> = stack
            .iter()
            .filter(|name| {
                let len = name.chars().count();
                !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len)
            })
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            return Err(DomainError::rule(format!(
                "Invalid technology names found in the stack: {}",
                invalid.join(", ")
            )));
        }

        Ok(Self(stack.iter().map(|name| name.to_lowercase()).collect()))
    }

    /// Rebuild a stack from a JSON-encoded list.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let Ok(Value::Array(items)) = serde_json::from_str::<Value>(json) else {
            return Err(DomainError::validation(
                "The json value did not decode to a list.",
            ));
        };

        let names = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<String>>>()
            .ok_or_else(|| {
                DomainError::validation("The technology stack must be a list of strings.")
            })?;

        Self::new(names)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check every technology against the catalog of recognized names.
    ///
    /// # Errors
    ///
    /// - `DomainError::RuleViolation` listing every unrecognized technology
    /// - `DomainError::Storage` if the catalog is missing or corrupted
    pub fn verify(&self, catalog: &TechnologyCatalog) -> DomainResult<Verified<TechStack>> {
        let known = catalog.technologies()?;

        let unknown: Vec<&str> = self
            .iter()
            .filter(|name| !known.contains(*name))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!("Unrecognized technologies: {}", unknown.join(", "));
            return Err(DomainError::rule(format!(
                "The following technologies are not recognized: {}",
                unknown.join(", ")
            )));
        }

        Ok(Verified::new(self.clone()))
    }
}

impl<'a> IntoIterator for &'a TechStack {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for TechStack {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TechStack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        TechStack::new(names).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_is_lowercased_in_order() {
        let stack = TechStack::new(["PHP", "Go", "Rust"]).unwrap();
        let names: Vec<&str> = stack.iter().collect();
        assert_eq!(names, ["php", "go", "rust"]);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_stack_needs_three_entries() {
        let err = TechStack::new(["rust", "go"]).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "The technology stack must contain at least three technologies."
        );
        assert!(TechStack::new(Vec::<String>::new()).unwrap_err().is_validation());
    }

    #[test]
    fn test_stack_rejects_empty_entries() {
        let err = TechStack::new(["rust", "", "go"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The technology stack must be a list of strings."
        );
    }

    #[test]
    fn test_stack_name_lengths() {
        let long = "x".repeat(51);
        let err = TechStack::new(["c", "rust", long.as_str()]).unwrap_err();
        assert!(err.is_rule_violation());
        assert_eq!(
            err.to_string(),
            format!("Invalid technology names found in the stack: c, {}", long)
        );

        let max = "y".repeat(50);
        assert!(TechStack::new(["go", "rust", max.as_str()]).is_ok());
    }

    #[test]
    fn test_from_json() {
        let stack = TechStack::from_json(r#"["Rust","Go","SQL"]"#).unwrap();
        assert_eq!(stack.as_slice(), ["rust", "go", "sql"]);

        let err = TechStack::from_json(r#"{"a":"rust"}"#).unwrap_err();
        assert_eq!(err.to_string(), "The json value did not decode to a list.");

        let err = TechStack::from_json(r#"["rust", 3, "go"]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The technology stack must be a list of strings."
        );
    }

    #[test]
    fn test_serialization() {
        let stack = TechStack::new(["Rust", "Go", "SQL"]).unwrap();
        assert_eq!(
            serde_json::to_string(&stack).unwrap(),
            r#"["rust","go","sql"]"#
        );
    }
}
