//! Column mappings for single value objects.

use super::Row;
use crate::domain::{Address, CompanyDomain, DomainError, DomainResult, Email, Link, Name, Verified};
use crate::support::attributes::{optional_string_attribute, string_attribute};
use serde_json::Value;

/// Column prefix of a standalone address.
pub const ADDRESS_PREFIX: &str = "address_";

fn column(prefix: &str, field: &str) -> String {
    format!("{}{}", prefix, field)
}

fn expect_string<'a>(value: &'a Value, key: &str) -> DomainResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| DomainError::validation(format!("The {} value must be a string.", key)))
}

/// Rebuild an address from `{prefix}country`, `{prefix}administrative_area`,
/// `{prefix}municipality`, `{prefix}street` and `{prefix}postal_code`.
///
/// Stored addresses were verified before being written, so the result is
/// trusted.
pub fn decode_address(row: &Row, prefix: &str) -> DomainResult<Verified<Address>> {
    let address = Address::new(
        string_attribute(row, &column(prefix, "country"))?,
        optional_string_attribute(row, &column(prefix, "administrative_area"))?,
        string_attribute(row, &column(prefix, "municipality"))?,
        optional_string_attribute(row, &column(prefix, "street"))?,
        optional_string_attribute(row, &column(prefix, "postal_code"))?,
    )?;
    Ok(Verified::from_trusted_storage(address))
}

/// Flatten a verified address into prefixed columns.
pub fn encode_address(address: &Verified<Address>, prefix: &str) -> Row {
    let optional = |value: Option<&str>| value.map_or(Value::Null, Value::from);

    let mut row = Row::new();
    row.insert(column(prefix, "country"), Value::from(address.country()));
    row.insert(
        column(prefix, "administrative_area"),
        optional(address.administrative_area()),
    );
    row.insert(
        column(prefix, "municipality"),
        Value::from(address.municipality()),
    );
    row.insert(column(prefix, "street"), optional(address.street()));
    row.insert(column(prefix, "postal_code"), optional(address.postal_code()));
    row
}

/// Rebuild a stored company domain.
pub fn decode_company_domain(value: &Value, key: &str) -> DomainResult<Verified<CompanyDomain>> {
    let domain = CompanyDomain::new(expect_string(value, key)?)?;
    Ok(Verified::from_trusted_storage(domain))
}

pub fn encode_company_domain(domain: &Verified<CompanyDomain>) -> Value {
    Value::from(domain.as_str())
}

/// Rebuild a nullable link column.
pub fn decode_link(value: &Value, key: &str) -> DomainResult<Option<Link>> {
    if value.is_null() {
        return Ok(None);
    }
    Link::new(expect_string(value, key)?).map(Some)
}

pub fn encode_link(link: Option<&Link>) -> Value {
    link.map_or(Value::Null, |link| Value::from(link.as_str()))
}

pub fn decode_email(value: &Value, key: &str) -> DomainResult<Email> {
    Email::new(expect_string(value, key)?)
}

pub fn encode_email(email: &Email) -> Value {
    Value::from(email.as_str())
}

/// Rebuild a name from `first_name` and `last_name`.
pub fn decode_name(row: &Row) -> DomainResult<Name> {
    Name::new(
        string_attribute(row, "first_name")?,
        string_attribute(row, "last_name")?,
    )
}

pub fn encode_name(name: &Name) -> Row {
    let mut row = Row::new();
    row.insert("first_name".to_string(), Value::from(name.firstname()));
    row.insert("last_name".to_string(), Value::from(name.lastname()));
    row
}
