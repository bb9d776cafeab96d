//! Column mapping for jobs.

use super::casts::{decode_address, encode_address};
use super::Row;
use crate::domain::{
    Address, DomainError, DomainResult, Job, JobCompensation, JobDescription, TechStack, Verified,
};
use crate::support::attributes::{integer_attribute, optional_string_attribute, string_attribute};
use serde_json::Value;

/// Column prefix of a job's address.
pub const JOB_ADDRESS_PREFIX: &str = "job_address_";

/// Rebuild a job from its `job_*` columns.
pub fn decode_job(row: &Row) -> DomainResult<Job> {
    let compensation = JobCompensation::parse(
        integer_attribute(row, "job_minimum_compensation")?,
        integer_attribute(row, "job_maximum_compensation")?,
        string_attribute(row, "job_compensation_currency")?,
        string_attribute(row, "job_compensation_type")?,
    )?;

    let description = optional_string_attribute(row, "job_description")?
        .map(JobDescription::from_json)
        .transpose()?;

    Job::parse(
        string_attribute(row, "job_title")?,
        string_attribute(row, "job_type")?,
        decode_address(row, JOB_ADDRESS_PREFIX)?.into_inner(),
        compensation,
        TechStack::from_json(string_attribute(row, "job_stack")?)?,
        description,
    )
}

/// Flatten a job into its `job_*` columns.
///
/// `address` must be the verified form of the job's address.
///
/// # Errors
///
/// `DomainError::Logic` if `address` differs from the job's address, and
/// `DomainError::Validation` if the stack or description cannot be encoded.
pub fn encode_job(job: &Job, address: &Verified<Address>) -> DomainResult<Row> {
    if address.get() != job.address() {
        return Err(DomainError::Logic(
            "The job address must be verified before it is stored.".to_string(),
        ));
    }

    let encode = |value: serde_json::Result<String>| {
        value.map_err(|e| DomainError::validation(format!("Failed to encode job: {}", e)))
    };

    let mut row = Row::new();
    row.insert("job_title".to_string(), Value::from(job.title().as_str()));
    row.insert("job_type".to_string(), Value::from(job.kind().as_str()));

    let compensation = job.compensation();
    row.insert(
        "job_minimum_compensation".to_string(),
        Value::from(compensation.minimum()),
    );
    row.insert(
        "job_maximum_compensation".to_string(),
        Value::from(compensation.maximum()),
    );
    row.insert(
        "job_compensation_currency".to_string(),
        Value::from(compensation.currency().as_str()),
    );
    row.insert(
        "job_compensation_type".to_string(),
        Value::from(compensation.kind().as_str()),
    );

    row.extend(encode_address(address, JOB_ADDRESS_PREFIX));

    row.insert(
        "job_stack".to_string(),
        Value::from(encode(serde_json::to_string(job.stack()))?),
    );
    let description = match job.description() {
        Some(description) => Value::from(encode(serde_json::to_string(description))?),
        None => Value::Null,
    };
    row.insert("job_description".to_string(), description);

    Ok(row)
}
