use job_board_core::domain::{Address, GeocodingOutcome, LocationType};
use job_board_core::error::{GeocodingError, GeocodingResult};
use job_board_core::verifiers::traits::Geocoder;
use std::sync::{Arc, Mutex};

/// Mock geocoder for testing.
///
/// Returns a configured outcome (or error) for every address and records
/// which addresses were geocoded.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockGeocoder {
    outcome: Arc<Mutex<Option<GeocodingOutcome>>>,
    failure: Arc<Mutex<Option<fn() -> GeocodingError>>>,
    calls: Arc<Mutex<Vec<Address>>>,
}

#[allow(dead_code)]
impl MockGeocoder {
    /// Geocoder that matches every address at building level.
    pub fn new() -> Self {
        Self::returning(
            GeocodingOutcome::new(LocationType::Building, true).with_street_match(true),
        )
    }

    /// Geocoder that answers with `outcome`.
    pub fn returning(outcome: GeocodingOutcome) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(Some(outcome))),
            failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Geocoder that fails with the error built by `failure`.
    pub fn failing(failure: fn() -> GeocodingError) -> Self {
        let mock = Self::new();
        *mock.failure.lock().unwrap() = Some(failure);
        mock
    }

    pub fn set_outcome(&self, outcome: GeocodingOutcome) {
        *self.outcome.lock().unwrap() = Some(outcome);
    }

    /// Number of geocode calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Addresses passed to geocode, in order.
    pub fn calls(&self) -> Vec<Address> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for MockGeocoder {
    fn geocode(&self, address: &Address) -> GeocodingResult<GeocodingOutcome> {
        self.calls.lock().unwrap().push(address.clone());

        if let Some(failure) = *self.failure.lock().unwrap() {
            return Err(failure());
        }

        let outcome = *self.outcome.lock().unwrap();
        outcome.ok_or_else(|| GeocodingError::UnexpectedResponse("no outcome configured".into()))
    }
}
