//! HTTP adapters for the verification collaborators.
//!
//! All clients are synchronous (`ureq`) with a per-agent timeout and share
//! the [`crate::metrics::Metrics`] counters.

mod geocodio;
mod probe;
mod technologies;

pub use geocodio::{location_type_for, GeocodioGeocoder};
pub use probe::UreqHttpProbe;
pub use technologies::{TechnologyCatalogRefresher, STACK_EXCHANGE_API_URL};
