//! Job board core - domain validation and verification for a job-board backend.
//!
//! Value objects enforce their format at construction time. Address, company
//! domain, link and technology stack can also be verified against the real
//! world (geocoding, DNS, an SSRF-guarded HTTP probe and a cached technology
//! allow-list); a successful verification produces a [`domain::Verified`]
//! value, the only form persistence accepts for addresses and domains.
//!
//! # Architecture
//!
//! - **domain**: Value objects, the `Verified` wrapper and the domain error taxonomy
//! - **verifiers**: Collaborator traits and the verification services
//! - **client**: `ureq` adapters for Geocodio, link probing and the Stack Exchange tags API
//! - **cache**: TTL memoization and key-value storage
//! - **support**: Reference data and shared validators
//! - **persistence**: Mapping to and from flat storage rows
//! - **error**: Collaborator error types
//! - **config**: Configuration management from environment variables
//! - **metrics**: Request and verification counters

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod persistence;
pub mod support;
pub mod verifiers;

pub use cache::{FileStore, KeyValueStore, MemoryStore, TimedCache};
pub use client::{GeocodioGeocoder, TechnologyCatalogRefresher, UreqHttpProbe};
pub use config::Config;
pub use domain::{DomainError, DomainResult, VerificationError, Verified};
pub use error::{ConfigError, GeocodingError, ProbeError, RefreshError, StorageError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use verifiers::{
    DefaultAddressVerifier, DefaultLinkVerifier, DnsDomainNameVerifier, SystemDnsResolver,
    TechnologyCatalog,
};
