//! Domain error taxonomy.
//!
//! Every value object operation and verifier returns [`DomainError`]. The
//! variants separate three kinds of failure:
//!
//! - **Validation**: malformed input rejected while constructing a value.
//! - **Rule violation**: well-formed input that breaks a business rule, or
//!   that reality disagrees with after verification.
//! - **Verification**: a lower-level failure raised by a verifier service.
//!   Value objects translate it into a rule violation and keep it as the
//!   source.
//!
//! Collaborator failures (geocoder outage, missing technology cache) and
//! programmer errors pass through untouched.

use crate::error::{GeocodingError, StorageError};
use thiserror::Error;

/// Failure reported by a verifier service when something does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// An address component could not be confirmed.
    #[error("{0}")]
    Address(String),

    /// A domain name has no A or AAAA record.
    #[error("{0}")]
    DomainName(String),

    /// A link is unreachable, unsafe or of an unaccepted type.
    #[error("{0}")]
    Link(String),
}

/// Which verifier a [`VerificationError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationKind {
    Address,
    DomainName,
    Link,
}

impl VerificationError {
    pub fn kind(&self) -> VerificationKind {
        match self {
            Self::Address(_) => VerificationKind::Address,
            Self::DomainName(_) => VerificationKind::DomainName,
            Self::Link(_) => VerificationKind::Link,
        }
    }
}

/// Errors raised by value objects and verifiers.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Input does not have the required syntax.
    #[error("{0}")]
    Validation(String),

    /// Input breaks a business rule.
    #[error("{message}")]
    RuleViolation {
        message: String,
        #[source]
        source: Option<VerificationError>,
    },

    /// A verifier could not confirm the value.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Programmer error, not meant to be handled by business logic.
    #[error("{0}")]
    Logic(String),

    /// The geocoding service failed.
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    /// Backing storage failed or held unusable data.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DomainError {
    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a rule violation without an underlying cause.
    pub fn rule(message: impl Into<String>) -> Self {
        Self::RuleViolation {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this is a construction-time syntax failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this is a business rule violation.
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, Self::RuleViolation { .. })
    }

    /// Whether the error is unrecoverable and should only reach top-level diagnostics.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Logic(_) | Self::Storage(_) => true,
            Self::Geocoding(err) => err.is_fatal(),
            Self::Validation(_) | Self::RuleViolation { .. } | Self::Verification(_) => false,
        }
    }

    /// Translate a verification failure of `kind` into a rule violation with `prefix`.
    ///
    /// Any other error, including a verification failure of another kind,
    /// is returned unchanged.
    pub(crate) fn into_rule_violation(self, kind: VerificationKind, prefix: &str) -> Self {
        match self {
            Self::Verification(err) if err.kind() == kind => Self::RuleViolation {
                message: format!("{}{}", prefix, err),
                source: Some(err),
            },
            other => other,
        }
    }
}

/// Convenience type alias for Results with DomainError
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = DomainError::validation("Invalid country name given: 42");
        assert_eq!(err.to_string(), "Invalid country name given: 42");

        let err = DomainError::rule("Maximum and minimum compensation should not be equal.");
        assert_eq!(
            err.to_string(),
            "Maximum and minimum compensation should not be equal."
        );
    }

    #[test]
    fn test_verification_translates_with_prefix_and_source() {
        let err = DomainError::from(VerificationError::DomainName(
            "The domain name given [nope.test] does not exist.".to_string(),
        ))
        .into_rule_violation(VerificationKind::DomainName, "Fake domain provided: ");

        assert!(err.is_rule_violation());
        assert_eq!(
            err.to_string(),
            "Fake domain provided: The domain name given [nope.test] does not exist."
        );
        let source = err.source().expect("wrapped cause is kept");
        assert_eq!(
            source.to_string(),
            "The domain name given [nope.test] does not exist."
        );
    }

    #[test]
    fn test_other_errors_pass_through_translation() {
        let err = DomainError::Logic("No geocoder was provided.".to_string())
            .into_rule_violation(VerificationKind::Address, "Invalid address: ");
        assert!(matches!(err, DomainError::Logic(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_foreign_verification_kind_is_not_translated() {
        let cause = VerificationError::Link("The link [https://x.test] is unreachable.".to_string());

        let err = DomainError::from(cause.clone())
            .into_rule_violation(VerificationKind::Address, "Invalid address: ");

        match err {
            DomainError::Verification(inner) => assert_eq!(inner, cause),
            other => panic!("expected untranslated verification error, got {:?}", other),
        }
    }

    #[test]
    fn test_fatal_classification() {
        assert!(!DomainError::validation("x").is_fatal());
        assert!(!DomainError::rule("x").is_fatal());
        assert!(DomainError::Storage(StorageError::Missing("k".to_string())).is_fatal());
        assert!(
            DomainError::Geocoding(GeocodingError::UnknownAccuracyType("zip".to_string()))
                .is_fatal()
        );
        assert!(!DomainError::Geocoding(GeocodingError::Timeout).is_fatal());
    }
}
