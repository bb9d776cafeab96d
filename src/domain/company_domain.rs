//! CompanyDomain value object.

use super::errors::{DomainError, DomainResult, VerificationKind};
use super::verified::Verified;
use crate::verifiers::DomainNameVerifier;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// The domain name a company operates under, e.g. `acme.com`.
///
/// Construction checks hostname syntax. Whether the domain actually
/// resolves is decided by a [`DomainNameVerifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyDomain(String);

impl CompanyDomain {
    /// Create a new CompanyDomain.
    ///
    /// # Validation Rules
    ///
    /// - At most 253 characters, a single trailing dot is ignored
    /// - Dot separated labels of 1 to 63 ASCII letters, digits or hyphens
    /// - Labels never start or end with a hyphen
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` when the hostname is malformed.
    pub fn new(domain: impl Into<String>) -> DomainResult<Self> {
        let domain = domain.into();

        if !is_hostname(&domain) {
            return Err(DomainError::rule(format!(
                "The domain name given [{}] is not valid.",
                domain
            )));
        }

        Ok(Self(domain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Confirm the domain has DNS address records.
    ///
    /// # Errors
    ///
    /// Verification failures become `DomainError::RuleViolation` prefixed
    /// with `"Fake domain provided: "`.
    pub fn verify<V>(&self, verifier: &V) -> DomainResult<Verified<CompanyDomain>>
    where
        V: DomainNameVerifier + ?Sized,
    {
        verifier
            .verify(self)
            .map_err(|e| {
                e.into_rule_violation(VerificationKind::DomainName, "Fake domain provided: ")
            })?;

        tracing::info!("Domain verified: {}", self.0);
        Ok(Verified::new(self.clone()))
    }
}

/// Check hostname syntax.
pub(crate) fn is_hostname(value: &str) -> bool {
    let host = value.strip_suffix('.').unwrap_or(value);

    if host.is_empty() || host.len() > MAX_DOMAIN_LENGTH {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

impl Serialize for CompanyDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompanyDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CompanyDomain::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for CompanyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
