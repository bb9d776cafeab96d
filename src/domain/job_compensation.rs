//! JobCompensation value object.

use super::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIN_SALARY: i64 = 20_000;
const MIN_HOURLY: i64 = 20;
const MIN_SALARY_RANGE: i64 = 10_000;
const MIN_HOURLY_RANGE: i64 = 10;

/// Currency a job pays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompensationCurrency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CAD")]
    Cad,
}

impl CompensationCurrency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Cad => "CAD",
        }
    }
}

impl FromStr for CompensationCurrency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "CAD" => Ok(Self::Cad),
            other => Err(DomainError::validation(format!(
                "The currency provided is not supported: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for CompensationCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a job pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationType {
    Hourly,
    Salary,
}

impl CompensationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Salary => "salary",
        }
    }

    pub fn is_hourly(self) -> bool {
        self == Self::Hourly
    }

    pub fn is_salary(self) -> bool {
        self == Self::Salary
    }
}

impl FromStr for CompensationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "salary" => Ok(Self::Salary),
            other => Err(DomainError::validation(format!(
                "The compensation type provided is not valid: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for CompensationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pay range offered for a job.
///
/// The bounds are business rules, so breaking them is a rule violation
/// rather than a validation failure. Every update re-checks both bounds
/// together, so the range invariants hold for every instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CompensationFields")]
pub struct JobCompensation {
    minimum: i64,
    maximum: i64,
    currency: CompensationCurrency,
    #[serde(rename = "type")]
    kind: CompensationType,
}

#[derive(Deserialize)]
struct CompensationFields {
    minimum: i64,
    maximum: i64,
    currency: CompensationCurrency,
    #[serde(rename = "type")]
    kind: CompensationType,
}

impl TryFrom<CompensationFields> for JobCompensation {
    type Error = DomainError;

    fn try_from(fields: CompensationFields) -> Result<Self, Self::Error> {
        JobCompensation::new(fields.minimum, fields.maximum, fields.currency, fields.kind)
    }
}

impl JobCompensation {
    /// Create a new JobCompensation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` when:
    /// - `maximum` is not greater than `minimum`
    /// - a salary starts below 20,000 or an hourly rate below 20
    /// - a salary range is narrower than 10,000 or an hourly range narrower than 10
    pub fn new(
        minimum: i64,
        maximum: i64,
        currency: CompensationCurrency,
        kind: CompensationType,
    ) -> DomainResult<Self> {
        check_bounds(minimum, maximum, kind)?;

        Ok(Self {
            minimum,
            maximum,
            currency,
            kind,
        })
    }

    /// Create a JobCompensation from the stored string forms of currency and type.
    pub fn parse(minimum: i64, maximum: i64, currency: &str, kind: &str) -> DomainResult<Self> {
        Self::new(minimum, maximum, currency.parse()?, kind.parse()?)
    }

    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    pub fn currency(&self) -> CompensationCurrency {
        self.currency
    }

    pub fn kind(&self) -> CompensationType {
        self.kind
    }

    pub fn with_minimum(&self, amount: i64) -> DomainResult<Self> {
        check_bounds(amount, self.maximum, self.kind)?;
        Ok(Self {
            minimum: amount,
            ..*self
        })
    }

    pub fn with_maximum(&self, amount: i64) -> DomainResult<Self> {
        check_bounds(self.minimum, amount, self.kind)?;
        Ok(Self {
            maximum: amount,
            ..*self
        })
    }

    pub fn with_currency(&self, currency: CompensationCurrency) -> Self {
        Self { currency, ..*self }
    }
}

fn check_bounds(minimum: i64, maximum: i64, kind: CompensationType) -> DomainResult<()> {
    if minimum > maximum {
        return Err(DomainError::rule(format!(
            "Minimum compensation [{}] must be less than maximum compensation [{}].",
            minimum, maximum
        )));
    }
    if minimum == maximum {
        return Err(DomainError::rule(
            "Maximum and minimum compensation should not be equal.",
        ));
    }

    match kind {
        CompensationType::Salary if minimum < MIN_SALARY => {
            return Err(DomainError::rule(format!(
                "Minimum salary given [{}] must not be less than 20,000",
                minimum
            )));
        }
        CompensationType::Hourly if minimum < MIN_HOURLY => {
            return Err(DomainError::rule(format!(
                "Minimum hourly pay given [{}] must not be less than 20.",
                minimum
            )));
        }
        _ => {}
    }

    let range = maximum - minimum;
    match kind {
        CompensationType::Salary if range < MIN_SALARY_RANGE => Err(DomainError::rule(
            "The salary range difference must not be lower than 10,000",
        )),
        CompensationType::Hourly if range < MIN_HOURLY_RANGE => Err(DomainError::rule(
            "The hourly pay range difference must not be lower than 10",
        )),
        _ => Ok(()),
    }
}
