//! Address value object.

use super::errors::{DomainError, DomainResult, VerificationKind};
use super::verified::Verified;
use crate::verifiers::{AddressValidator, AddressVerifier};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static REGION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\s'-]{2,}$").expect("Failed to compile region name regex")
});

static MUNICIPALITY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\s'-]{3,}$").expect("Failed to compile municipality regex")
});

static STREET_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([[:digit:]]{1,6}\s)?[\p{L}\p{N}\s'-]+$")
        .expect("Failed to compile street address regex")
});

static POSTAL_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:][:space:]-]+$").expect("Failed to compile postal code regex")
});

/// A physical address limited to the components the job board uses.
///
/// Construction only checks the shape of each component. Whether the
/// address exists is decided by an [`AddressVerifier`], which turns an
/// `Address` into a [`Verified<Address>`].
///
/// # Example
///
/// ```
/// use job_board_core::domain::Address;
///
/// let address = Address::new("Canada", Some("Ontario"), "Toronto", None, None).unwrap();
/// assert_eq!(address.municipality(), "Toronto");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressFields", rename_all = "camelCase")]
pub struct Address {
    country: String,
    administrative_area: Option<String>,
    municipality: String,
    street: Option<String>,
    postal_code: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressFields {
    country: String,
    #[serde(default)]
    administrative_area: Option<String>,
    municipality: String,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
}

impl TryFrom<AddressFields> for Address {
    type Error = DomainError;

    fn try_from(fields: AddressFields) -> Result<Self, Self::Error> {
        Address::new(
            fields.country,
            fields.administrative_area.as_deref(),
            fields.municipality,
            fields.street.as_deref(),
            fields.postal_code.as_deref(),
        )
    }
}

impl Address {
    /// Create a new Address, validating every component.
    ///
    /// # Validation Rules
    ///
    /// - Country and administrative area: at least 2 letters, spaces, apostrophes or hyphens
    /// - Municipality: the same alphabet, at least 3 characters
    /// - Street: at least 4 characters, an optional house number of up to
    ///   6 digits followed by words
    /// - Postal code: at least 3 alphanumeric characters, spaces or hyphens
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the offending component.
    pub fn new(
        country: impl Into<String>,
        administrative_area: Option<&str>,
        municipality: impl Into<String>,
        street: Option<&str>,
        postal_code: Option<&str>,
    ) -> DomainResult<Self> {
        let country = country.into();
        let administrative_area = administrative_area.map(str::to_string);
        let municipality = municipality.into();
        let street = street.map(str::to_string);
        let postal_code = postal_code.map(str::to_string);

        if !REGION_NAME.is_match(&country) {
            return Err(DomainError::validation(format!(
                "Invalid country name given: {}",
                country
            )));
        }
        if let Some(area) = &administrative_area {
            if !REGION_NAME.is_match(area) {
                return Err(DomainError::validation(format!(
                    "Invalid administrative area name given: {}",
                    area
                )));
            }
        }
        if !MUNICIPALITY_NAME.is_match(&municipality) {
            return Err(DomainError::validation(format!(
                "Invalid municipality name given: {}",
                municipality
            )));
        }
        if let Some(street) = &street {
            if street.chars().count() < 4 || !STREET_ADDRESS.is_match(street) {
                return Err(DomainError::validation(format!(
                    "[{}] has an incorrect street address format.",
                    street
                )));
            }
        }
        if let Some(code) = &postal_code {
            if code.chars().count() < 3 || !POSTAL_CODE.is_match(code) {
                return Err(DomainError::validation(format!(
                    "Invalid postal code given: {}",
                    code
                )));
            }
        }

        Ok(Self {
            country,
            administrative_area,
            municipality,
            street,
            postal_code,
        })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn administrative_area(&self) -> Option<&str> {
        self.administrative_area.as_deref()
    }

    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// Human readable area the municipality belongs to, e.g. `"Ontario, Canada"`.
    pub(crate) fn region_label(&self) -> String {
        match &self.administrative_area {
            Some(area) => format!("{}, {}", area, self.country),
            None => self.country.clone(),
        }
    }

    /// Confirm the address exists.
    ///
    /// On success returns a [`Verified<Address>`]; this address is left
    /// untouched and can be verified again.
    ///
    /// # Errors
    ///
    /// Verification failures become `DomainError::RuleViolation` prefixed
    /// with `"Invalid address: "`. Geocoder outages and programmer errors
    /// propagate unchanged.
    pub fn verify<V>(&self, verifier: &V) -> DomainResult<Verified<Address>>
    where
        V: AddressVerifier + ?Sized,
    {
        verifier
            .verify(self)
            .map_err(|e| {
                e.into_rule_violation(VerificationKind::Address, "Invalid address: ")
            })?;

        tracing::info!(
            "Address verified: {}, {}",
            self.municipality,
            self.region_label()
        );
        Ok(Verified::new(self.clone()))
    }

    /// Validate the address against an [`AddressValidator`].
    ///
    /// Same contract as [`Address::verify`].
    pub fn validate<V>(&self, validator: &V) -> DomainResult<Verified<Address>>
    where
        V: AddressValidator + ?Sized,
    {
        validator
            .validate(self)
            .map_err(|e| {
                e.into_rule_violation(VerificationKind::Address, "Invalid address: ")
            })?;

        Ok(Verified::new(self.clone()))
    }
}
