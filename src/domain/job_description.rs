//! JobDescription value object.

use super::errors::{DomainError, DomainResult};
use crate::support::validators::{as_string_list, is_string_list};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Education level a job asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "College")]
    College,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Doctorate,
}

impl Education {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bachelors => "Bachelor's",
            Self::College => "College",
            Self::Masters => "Master's",
            Self::Doctorate => "PhD",
        }
    }
}

impl FromStr for Education {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bachelor's" => Ok(Self::Bachelors),
            "College" => Ok(Self::College),
            "Master's" => Ok(Self::Masters),
            "PhD" => Ok(Self::Doctorate),
            other => Err(DomainError::rule(format!("Invalid degree given: {}", other))),
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The long-form description of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DescriptionFields", rename_all = "camelCase")]
pub struct JobDescription {
    responsibilities: Vec<String>,
    requirements: Vec<String>,
    benefits: Vec<String>,
    education: Option<Education>,
    #[serde(serialize_with = "serialize_start_date")]
    start_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptionFields {
    responsibilities: Vec<String>,
    requirements: Vec<String>,
    benefits: Vec<String>,
    #[serde(default)]
    education: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
}

impl TryFrom<DescriptionFields> for JobDescription {
    type Error = DomainError;

    fn try_from(fields: DescriptionFields) -> Result<Self, Self::Error> {
        JobDescription::new(
            fields.responsibilities,
            fields.requirements,
            fields.benefits,
            fields.education.as_deref(),
            fields.start_date.as_deref(),
        )
    }
}

fn serialize_start_date<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, false)),
        None => serializer.serialize_none(),
    }
}

impl JobDescription {
    /// Create a new JobDescription.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if a list is empty or holds an empty
    ///   string, or the start date cannot be parsed
    /// - `DomainError::RuleViolation` if the education is not one of
    ///   `Bachelor's`, `College`, `Master's` or `PhD`
    pub fn new(
        responsibilities: Vec<String>,
        requirements: Vec<String>,
        benefits: Vec<String>,
        education: Option<&str>,
        start_date: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            responsibilities: check_list(responsibilities, "responsibility")?,
            requirements: check_list(requirements, "requirement")?,
            benefits: check_list(benefits, "benefit")?,
            education: education.map(str::parse::<Education>).transpose()?,
            start_date: start_date.map(parse_start_date).transpose()?,
        })
    }

    /// Rebuild a description from its JSON projection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the JSON is malformed or any
    /// field has the wrong type, besides the errors of [`JobDescription::new`].
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let parsed: Value = serde_json::from_str(json).map_err(|_| {
            DomainError::validation("Invalid job description: not a valid JSON.")
        })?;
        let Value::Object(fields) = parsed else {
            return Err(DomainError::validation(
                "Invalid job description: not a valid JSON.",
            ));
        };

        Self::new(
            list_field(&fields, "responsibilities", "responsibility")?,
            list_field(&fields, "requirements", "requirement")?,
            list_field(&fields, "benefits", "benefit")?,
            text_field(&fields, "education")?,
            text_field(&fields, "startDate")?,
        )
    }

    pub fn responsibilities(&self) -> &[String] {
        &self.responsibilities
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn benefits(&self) -> &[String] {
        &self.benefits
    }

    pub fn education(&self) -> Option<Education> {
        self.education
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn with_responsibilities(&self, responsibilities: Vec<String>) -> DomainResult<Self> {
        Ok(Self {
            responsibilities: check_list(responsibilities, "responsibility")?,
            ..self.clone()
        })
    }

    pub fn with_requirements(&self, requirements: Vec<String>) -> DomainResult<Self> {
        Ok(Self {
            requirements: check_list(requirements, "requirement")?,
            ..self.clone()
        })
    }

    pub fn with_benefits(&self, benefits: Vec<String>) -> DomainResult<Self> {
        Ok(Self {
            benefits: check_list(benefits, "benefit")?,
            ..self.clone()
        })
    }

    pub fn with_education(&self, education: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            education: education.map(str::parse::<Education>).transpose()?,
            ..self.clone()
        })
    }

    pub fn with_start_date(&self, start_date: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            start_date: start_date.map(parse_start_date).transpose()?,
            ..self.clone()
        })
    }
}

fn check_list(items: Vec<String>, item: &str) -> DomainResult<Vec<String>> {
    if !is_string_list(&items) {
        return Err(DomainError::validation(format!(
            "Invalid job description: each {} must be a non-empty string.",
            item
        )));
    }
    Ok(items)
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_start_date(value: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .ok_or_else(|| {
            DomainError::validation(format!(
                "Invalid job description: start date [{}] is not a valid date.",
                value
            ))
        })
}

fn list_field(fields: &Map<String, Value>, key: &str, item: &str) -> DomainResult<Vec<String>> {
    let value = fields.get(key).filter(|v| v.is_array()).ok_or_else(|| {
        DomainError::validation(format!("Invalid job description: {} are missing.", key))
    })?;

    as_string_list(value).ok_or_else(|| {
        DomainError::validation(format!(
            "Invalid job description: each {} must be a non-empty string.",
            item
        ))
    })
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> DomainResult<Option<&'a str>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.as_str())),
        Some(_) => Err(DomainError::validation(format!(
            "Invalid job description: {} must be a string.",
            key
        ))),
    }
}
