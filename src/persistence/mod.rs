//! Mapping between value objects and flat storage rows.
//!
//! A row is a JSON object keyed by column name. Address and company domain
//! columns can only be written from a [`crate::domain::Verified`] value, and
//! reading them back yields a trusted `Verified` value.

mod casts;
mod job;

pub use casts::{
    decode_address, decode_company_domain, decode_email, decode_link, decode_name,
    encode_address, encode_company_domain, encode_email, encode_link, encode_name,
    ADDRESS_PREFIX,
};
pub use job::{decode_job, encode_job, JOB_ADDRESS_PREFIX};

/// A flat storage row.
pub type Row = serde_json::Map<String, serde_json::Value>;
