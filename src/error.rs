//! Error types for collaborators of the verification core.
//!
//! This module defines custom error types using `thiserror` for the network,
//! storage and configuration layers. Domain-level failures live in
//! [`crate::domain::DomainError`].

use thiserror::Error;

/// Errors that can occur when talking to the geocoding service.
#[derive(Error, Debug)]
pub enum GeocodingError {
    /// HTTP request failed
    #[error("Geocoding request failed: {0}")]
    HttpError(String),

    /// Service returned an error status code
    #[error("Geocoding service error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Geocoding request timeout")]
    Timeout,

    /// Response did not have the expected shape
    #[error("Unexpected geocoding response: {0}")]
    UnexpectedResponse(String),

    /// Provider returned an accuracy classification we do not know
    #[error("Unknown location type: {0}")]
    UnknownAccuracyType(String),
}

impl GeocodingError {
    /// Whether the error indicates a programming or contract problem rather
    /// than a transient outage.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownAccuracyType(_))
    }
}

/// Errors raised by the HTTP probe used for link reachability checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Could not connect to the pinned address
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request exceeded its deadline
    #[error("Request timeout")]
    Timeout,

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors raised by key-value storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The key has never been written
    #[error("Nothing stored under key: {0}")]
    Missing(String),

    /// Stored payload is not what the reader expects
    #[error("Stored data is corrupted: {0}")]
    Corrupted(String),

    /// Filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors that can occur while refreshing the technology allow-list.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// HTTP request failed
    #[error("Failed to fetch tags from API: {0}")]
    HttpError(String),

    /// Response body could not be used
    #[error("Failed to parse tags API response: {0}")]
    InvalidResponse(String),

    /// Writing the result failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with GeocodingError
pub type GeocodingResult<T> = Result<T, GeocodingError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeocodingError::UnknownAccuracyType("zip".to_string());
        assert_eq!(err.to_string(), "Unknown location type: zip");

        let err = ConfigError::MissingVar("APP_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: APP_URL"
        );

        let err = StorageError::Missing("valid_technologies.json".to_string());
        assert_eq!(
            err.to_string(),
            "Nothing stored under key: valid_technologies.json"
        );

        let err = ProbeError::Timeout;
        assert_eq!(err.to_string(), "Request timeout");
    }

    #[test]
    fn test_api_error_variants() {
        let err = GeocodingError::ApiError {
            status: 422,
            message: "Could not geocode address".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Could not geocode address"));
        assert!(!err.is_fatal());
    }
}
