//! Configuration management for the verification core.
//!
//! This module handles loading and validating configuration from environment
//! variables, reading a `.env` file first if one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Configuration for the verification services.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL the application is served from
    pub app_url: String,

    /// Geocodio API key
    pub geocodio_api_key: String,

    /// Geocodio base URL including the API version
    pub geocodio_base_url: String,

    /// Timeout for each geocoding, DNS and link request in milliseconds (default: 1000)
    pub verification_timeout_ms: u64,

    /// Directory of the file store (default: "storage")
    pub storage_path: PathBuf,

    /// How long the technology allow-list is kept in memory (default: 60)
    pub technology_cache_ttl_minutes: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `APP_URL`: URL the application is served from
    /// - `GEOCODIO_API_KEY`: API key for Geocodio
    ///
    /// Optional environment variables:
    /// - `GEOCODIO_BASE_URL`: Geocodio endpoint (default: https://api.geocod.io/v1.7)
    /// - `VERIFICATION_TIMEOUT_MS`: per-request timeout (default: 1000)
    /// - `STORAGE_PATH`: file store directory (default: storage)
    /// - `TECHNOLOGY_CACHE_TTL_MINUTES`: allow-list memo TTL (default: 60)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let app_url =
            env::var("APP_URL").map_err(|_| ConfigError::MissingVar("APP_URL".to_string()))?;

        let geocodio_api_key = env::var("GEOCODIO_API_KEY")
            .map_err(|_| ConfigError::MissingVar("GEOCODIO_API_KEY".to_string()))?;

        let app_host_ok = Url::parse(&app_url)
            .map(|url| url.host_str().is_some())
            .unwrap_or(false);
        if !app_host_ok {
            return Err(ConfigError::InvalidValue {
                var: "APP_URL".to_string(),
                reason: "Must be an absolute URL with a host".to_string(),
            });
        }

        if geocodio_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "GEOCODIO_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let geocodio_base_url = env::var("GEOCODIO_BASE_URL")
            .unwrap_or_else(|_| "https://api.geocod.io/v1.7".to_string());
        if !geocodio_base_url.starts_with("http://") && !geocodio_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "GEOCODIO_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let verification_timeout_ms = Self::parse_env_u64("VERIFICATION_TIMEOUT_MS", 1000)?;
        if verification_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                var: "VERIFICATION_TIMEOUT_MS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let technology_cache_ttl_minutes =
            Self::parse_env_u64("TECHNOLOGY_CACHE_TTL_MINUTES", 60)?;

        let storage_path = env::var("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("storage"));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            app_url,
            geocodio_api_key,
            geocodio_base_url,
            verification_timeout_ms,
            storage_path,
            technology_cache_ttl_minutes,
            log_level,
        })
    }

    /// ASCII host of `app_url`; links to it skip verification.
    pub fn local_host(&self) -> Option<String> {
        Url::parse(&self.app_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    pub fn verification_timeout(&self) -> Duration {
        Duration::from_millis(self.verification_timeout_ms)
    }

    pub fn technology_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.technology_cache_ttl_minutes * 60)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app_url: String::new(),
            geocodio_api_key: String::new(),
            geocodio_base_url: "https://api.geocod.io/v1.7".to_string(),
            verification_timeout_ms: 1000,
            storage_path: PathBuf::from("storage"),
            technology_cache_ttl_minutes: 60,
            log_level: "info".to_string(),
        }
    }
}
