//! Link value object.

use super::errors::{DomainError, DomainResult, VerificationKind};
use super::verified::Verified;
use crate::verifiers::LinkVerifier;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// A link to a document hosted somewhere on the web, such as a résumé.
///
/// The stored form is the normalized ASCII serialization of the URL, so
/// internationalized hosts are kept in punycode.
///
/// # Example
///
/// ```
/// use job_board_core::domain::Link;
///
/// let link = Link::new("https://example.com/resume.pdf").unwrap();
/// assert_eq!(link.as_str(), "https://example.com/resume.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link(Url);

impl Link {
    /// Create a new Link.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if the value is not a URL or its scheme
    ///   is not `http`/`https`
    /// - `DomainError::RuleViolation` if the URL has no path beyond `/`
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let value = value.as_ref();

        let url = Url::parse(value).map_err(|_| {
            DomainError::validation(format!("The link given [{}] is invalid.", value))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::validation(format!(
                "The link given [{}] must contain the HTTP scheme.",
                value
            )));
        }

        if url.path().is_empty() || url.path() == "/" {
            return Err(DomainError::rule(format!(
                "The link given [{}] must have a path.",
                value
            )));
        }

        Ok(Self(url))
    }

    /// The normalized ASCII form of the link.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The parsed URL.
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Confirm the link points at a reachable document of an accepted type.
    ///
    /// # Errors
    ///
    /// Verification failures become `DomainError::RuleViolation` prefixed
    /// with `"Fake link provided: "`.
    pub fn verify<V>(&self, verifier: &V) -> DomainResult<Verified<Link>>
    where
        V: LinkVerifier + ?Sized,
    {
        verifier
            .verify(self)
            .map_err(|e| {
                e.into_rule_violation(VerificationKind::Link, "Fake link provided: ")
            })?;

        tracing::info!("Link verified: {}", self.as_str());
        Ok(Verified::new(self.clone()))
    }
}

impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Link::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
