//! Geocodio REST adapter.

use crate::config::Config;
use crate::domain::{Address, GeocodingOutcome, LocationType};
use crate::error::{GeocodingError, GeocodingResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::verifiers::Geocoder;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// [`Geocoder`] backed by the Geocodio API.
///
/// Issues one query for the municipality and, when the address has a
/// street, a second query including it.
#[derive(Clone)]
pub struct GeocodioGeocoder {
    /// Base URL including the API version, e.g. `https://api.geocod.io/v1.7`
    base_url: String,

    api_key: String,

    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

/// Fields of the best result in a Geocodio response.
#[derive(Debug, Clone, PartialEq)]
struct GeocodioMatch {
    accuracy: f64,
    accuracy_type: String,
    city: Option<String>,
}

impl GeocodioGeocoder {
    /// Create a geocoder from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.geocodio_base_url.clone(),
            config.geocodio_api_key.clone(),
            config.verification_timeout(),
        )
    }

    /// Create a geocoder with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::build(base_url, api_key, Duration::from_secs(10))
    }

    fn build(base_url: String, api_key: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share a metrics collector with other collaborators.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn build_url(&self, query: &[(&str, &str)]) -> String {
        let params: Vec<String> = query
            .iter()
            .chain(std::iter::once(&("api_key", self.api_key.as_str())))
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();

        format!(
            "{}/geocode?{}",
            self.base_url.trim_end_matches('/'),
            params.join("&")
        )
    }

    /// Run one geocoding query and extract its best match.
    fn query(&self, query: &[(&str, &str)]) -> GeocodingResult<GeocodioMatch> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(query);
        tracing::debug!(
            "GET {}/geocode ({})",
            self.base_url,
            query
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        timer.finish(&result);

        let body = result?
            .into_string()
            .map_err(|e| GeocodingError::HttpError(e.to_string()))?;
        let json: Value = serde_json::from_str(&body)?;

        parse_response(&json)
    }

    /// Map a ureq error to a GeocodingError.
    fn map_error(&self, error: ureq::Error) -> GeocodingError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .ok()
                    .and_then(|body| {
                        serde_json::from_str::<Value>(&body)
                            .ok()
                            .and_then(|json| json["error"].as_str().map(str::to_string))
                            .or(Some(body))
                    })
                    .unwrap_or_else(|| "Unknown error".to_string());

                GeocodingError::ApiError {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    GeocodingError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::HttpError(transport.to_string())
                }
            }
        }
    }
}

impl Geocoder for GeocodioGeocoder {
    #[allow(clippy::float_cmp)]
    fn geocode(&self, address: &Address) -> GeocodingResult<GeocodingOutcome> {
        let mut query = vec![
            ("country", address.country()),
            ("city", address.municipality()),
        ];
        if let Some(state) = address.administrative_area() {
            query.push(("state", state));
        }

        let first = self.query(&query)?;

        let second = match address.street() {
            Some(street) => {
                query.push(("street", street));
                Some(self.query(&query)?)
            }
            None => None,
        };

        let location_type =
            location_type_for(&second.as_ref().unwrap_or(&first).accuracy_type)?;

        // Exact equality with the top score, not a threshold
        let municipality_exact_match = first
            .city
            .as_deref()
            .is_some_and(|city| city.to_lowercase() == address.municipality().to_lowercase())
            && first.accuracy == 1.0;

        let outcome = GeocodingOutcome::new(location_type, municipality_exact_match);
        Ok(match second {
            Some(second) => outcome.with_street_match(second.accuracy == 1.0),
            None => outcome,
        })
    }
}

/// Map a Geocodio `accuracy_type` to a [`LocationType`].
///
/// # Errors
///
/// `GeocodingError::UnknownAccuracyType` for any classification Geocodio
/// did not document.
pub fn location_type_for(accuracy_type: &str) -> GeocodingResult<LocationType> {
    match accuracy_type {
        "country" => Ok(LocationType::Country),
        "state" => Ok(LocationType::AdministrativeArea),
        "place" => Ok(LocationType::Municipality),
        "street_center" | "intersection" => Ok(LocationType::Street),
        "rooftop" | "point" | "range_interpolation" => Ok(LocationType::Building),
        "nearest_rooftop_match" => Ok(LocationType::Approximate),
        other => Err(GeocodingError::UnknownAccuracyType(other.to_string())),
    }
}

fn parse_response(json: &Value) -> GeocodingResult<GeocodioMatch> {
    let result = json["results"]
        .as_array()
        .and_then(|results| results.first())
        .ok_or_else(|| {
            GeocodingError::UnexpectedResponse(
                "Geocoding response is missing geocoding results.".to_string(),
            )
        })?;

    let accuracy = result["accuracy"].as_f64().ok_or_else(|| {
        GeocodingError::UnexpectedResponse(
            "Expected an integer or float as accuracy score.".to_string(),
        )
    })?;
    let accuracy_type = result["accuracy_type"].as_str().ok_or_else(|| {
        GeocodingError::UnexpectedResponse("Expected a string as accuracy type.".to_string())
    })?;
    let components = result["address_components"].as_object().ok_or_else(|| {
        GeocodingError::UnexpectedResponse("Expected an array as address components.".to_string())
    })?;

    Ok(GeocodioMatch {
        accuracy,
        accuracy_type: accuracy_type.to_string(),
        city: components
            .get("city")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
