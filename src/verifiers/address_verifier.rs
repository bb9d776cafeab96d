//! Geocoding-backed address verification.

use super::traits::{AddressVerifier, Geocoder};
use crate::domain::{Address, DomainError, DomainResult, VerificationError};
use crate::metrics::Metrics;
use crate::support::{RegionRepository, StaticRegionRepository};
use std::sync::Arc;

/// Verifies addresses component by component.
///
/// Country and administrative area are resolved against reference data,
/// municipality and street through the geocoder, and the postal code
/// against the country's postal format.
#[derive(Clone)]
pub struct DefaultAddressVerifier {
    geocoder: Option<Arc<dyn Geocoder>>,
    regions: Arc<dyn RegionRepository>,
    metrics: Metrics,
}

impl DefaultAddressVerifier {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder: Some(geocoder),
            regions: Arc::new(StaticRegionRepository::new()),
            metrics: Metrics::new(),
        }
    }

    /// A verifier with no geocoder; every verification is a logic error
    /// until [`DefaultAddressVerifier::set_geocoder`] is called.
    pub fn without_geocoder() -> Self {
        Self {
            geocoder: None,
            regions: Arc::new(StaticRegionRepository::new()),
            metrics: Metrics::new(),
        }
    }

    pub fn set_geocoder(&mut self, geocoder: Arc<dyn Geocoder>) -> &mut Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace the reference data.
    pub fn with_regions(mut self, regions: Arc<dyn RegionRepository>) -> Self {
        self.regions = regions;
        self
    }
}

fn failure(message: String) -> DomainError {
    tracing::warn!("Address verification failed: {}", message);
    VerificationError::Address(message).into()
}

impl AddressVerifier for DefaultAddressVerifier {
    fn verify(&self, address: &Address) -> DomainResult<()> {
        let result = self.check(address);
        self.metrics.record_verification(result.is_ok());
        result
    }
}

impl DefaultAddressVerifier {
    fn check(&self, address: &Address) -> DomainResult<()> {
        let geocoder = self
            .geocoder
            .as_ref()
            .ok_or_else(|| DomainError::Logic("No geocoder was provided.".to_string()))?;

        let country_code = self.regions.country_code(address.country()).ok_or_else(|| {
            failure(format!("The country [{}] does not exist.", address.country()))
        })?;

        let subdivision_code = address
            .administrative_area()
            .map(|area| {
                self.regions.subdivision_code(&country_code, area).ok_or_else(|| {
                    failure(format!(
                        "{} is not an administrative subdivision of {}.",
                        area,
                        address.country()
                    ))
                })
            })
            .transpose()?;

        let outcome = geocoder.geocode(address)?;
        tracing::debug!("Geocoding outcome for {}: {:?}", address.municipality(), outcome);

        if !outcome.municipality_exact_match {
            return Err(failure(format!(
                "{} is not a municipality within {}.",
                address.municipality(),
                address.region_label()
            )));
        }

        if let Some(street) = address.street() {
            let street_matched = outcome.street_exact_match == Some(true)
                && outcome.location_type.is_street_level();
            if !street_matched {
                return Err(failure(format!(
                    "[{}] is not a street address within {}, {}.",
                    street,
                    address.municipality(),
                    address.region_label()
                )));
            }
        }

        if let Some(postal_code) = address.postal_code() {
            if !self.regions.is_valid_postal_code(
                &country_code,
                subdivision_code.as_deref(),
                postal_code,
            ) {
                return Err(failure(format!(
                    "The postal code [{}] is invalid.",
                    postal_code
                )));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for DefaultAddressVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAddressVerifier")
            .field("has_geocoder", &self.geocoder.is_some())
            .finish()
    }
}
