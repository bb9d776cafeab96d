//! Job value object.

use super::errors::{DomainError, DomainResult};
use super::{Address, JobCompensation, JobDescription, JobTitle, TechStack};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employment type of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Contract => "contract",
            Self::Internship => "internship",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }

    pub fn is_full_time(self) -> bool {
        self == Self::FullTime
    }

    pub fn is_part_time(self) -> bool {
        self == Self::PartTime
    }

    pub fn is_contract(self) -> bool {
        self == Self::Contract
    }

    pub fn is_internship(self) -> bool {
        self == Self::Internship
    }
}

impl FromStr for JobType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(Self::FullTime),
            "part-time" => Ok(Self::PartTime),
            "contract" => Ok(Self::Contract),
            "internship" => Ok(Self::Internship),
            other => Err(DomainError::validation(format!(
                "The job type provided is not valid: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job offer.
///
/// Every `with_*` method returns a new `Job`; the original is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    title: JobTitle,
    #[serde(rename = "type")]
    kind: JobType,
    address: Address,
    compensation: JobCompensation,
    stack: TechStack,
    description: Option<JobDescription>,
}

impl Job {
    pub fn new(
        title: JobTitle,
        kind: JobType,
        address: Address,
        compensation: JobCompensation,
        stack: TechStack,
        description: Option<JobDescription>,
    ) -> Self {
        Self {
            title,
            kind,
            address,
            compensation,
            stack,
            description,
        }
    }

    /// Create a job from the raw title and type strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title is invalid or the type
    /// is not one of `full-time`, `part-time`, `contract`, `internship`.
    pub fn parse(
        title: &str,
        kind: &str,
        address: Address,
        compensation: JobCompensation,
        stack: TechStack,
        description: Option<JobDescription>,
    ) -> DomainResult<Self> {
        Ok(Self::new(
            JobTitle::new(title)?,
            kind.parse()?,
            address,
            compensation,
            stack,
            description,
        ))
    }

    pub fn title(&self) -> &JobTitle {
        &self.title
    }

    pub fn kind(&self) -> JobType {
        self.kind
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn compensation(&self) -> &JobCompensation {
        &self.compensation
    }

    pub fn stack(&self) -> &TechStack {
        &self.stack
    }

    pub fn description(&self) -> Option<&JobDescription> {
        self.description.as_ref()
    }

    pub fn with_title(&self, title: &str) -> DomainResult<Self> {
        Ok(Self {
            title: JobTitle::new(title)?,
            ..self.clone()
        })
    }

    pub fn with_type(&self, kind: &str) -> DomainResult<Self> {
        Ok(Self {
            kind: kind.parse()?,
            ..self.clone()
        })
    }

    pub fn with_address(&self, address: Address) -> Self {
        Self {
            address,
            ..self.clone()
        }
    }

    pub fn with_compensation(&self, compensation: JobCompensation) -> Self {
        Self {
            compensation,
            ..self.clone()
        }
    }

    pub fn with_stack(&self, stack: TechStack) -> Self {
        Self {
            stack,
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: Option<JobDescription>) -> Self {
        Self {
            description,
            ..self.clone()
        }
    }
}
