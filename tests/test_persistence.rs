//! Integration tests for storage row mapping.

mod mocks;

use job_board_core::domain::{
    Address, CompanyDomain, DomainError, Email, Job, JobCompensation, JobDescription, Link, Name,
    TechStack, Verified,
};
use job_board_core::persistence::{
    decode_address, decode_company_domain, decode_email, decode_job, decode_link, decode_name,
    encode_address, encode_company_domain, encode_email, encode_job, encode_link, encode_name,
    Row, ADDRESS_PREFIX,
};
use job_board_core::DefaultAddressVerifier;
use mocks::{MockDnsResolver, MockGeocoder};
use serde_json::{json, Value};
use std::sync::Arc;

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => panic!("row fixture must be an object"),
    }
}

fn toronto() -> Address {
    Address::new("Canada", Some("Ontario"), "Toronto", None, Some("M5V 3L9")).unwrap()
}

fn verified(address: &Address) -> Verified<Address> {
    let verifier = DefaultAddressVerifier::new(Arc::new(MockGeocoder::new()));
    address.verify(&verifier).unwrap()
}

fn job(address: Address) -> Job {
    Job::parse(
        "Senior Rust Engineer",
        "full-time",
        address,
        JobCompensation::parse(90000, 120000, "CAD", "salary").unwrap(),
        TechStack::new(["Rust", "PostgreSQL", "Docker"]).unwrap(),
        Some(
            JobDescription::new(
                vec!["Build services".to_string()],
                vec!["Rust experience".to_string()],
                vec!["Remote work".to_string()],
                Some("Master's"),
                Some("2026-03-01"),
            )
            .unwrap(),
        ),
    )
    .unwrap()
}

#[test]
fn test_address_round_trip() {
    let address = toronto();
    let encoded = encode_address(&verified(&address), ADDRESS_PREFIX);

    assert_eq!(encoded["address_country"], json!("Canada"));
    assert_eq!(encoded["address_street"], Value::Null);

    let decoded = decode_address(&encoded, ADDRESS_PREFIX).unwrap();
    assert_eq!(decoded.into_inner(), address);
}

#[test]
fn test_address_missing_column() {
    let err = decode_address(
        &row(json!({ "address_country": "Canada", "address_municipality": "Toronto" })),
        ADDRESS_PREFIX,
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Missing required 'address_administrative_area' attribute."
    );
}

#[test]
fn test_address_wrong_type() {
    let err = decode_address(
        &row(json!({
            "address_country": "Canada",
            "address_administrative_area": null,
            "address_municipality": 42,
            "address_street": null,
            "address_postal_code": null,
        })),
        ADDRESS_PREFIX,
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The value of 'address_municipality' attribute must be a string."
    );
}

#[test]
fn test_job_round_trip() {
    let address = toronto();
    let job = job(address.clone());

    let encoded = encode_job(&job, &verified(&address)).unwrap();
    assert_eq!(encoded["job_type"], json!("full-time"));
    assert_eq!(encoded["job_address_municipality"], json!("Toronto"));
    assert_eq!(encoded["job_stack"], json!(r#"["rust","postgresql","docker"]"#));

    let decoded = decode_job(&encoded).unwrap();
    assert_eq!(decoded, job);
}

#[test]
fn test_job_without_description() {
    let address = toronto();
    let job = job(address.clone()).with_description(None);

    let encoded = encode_job(&job, &verified(&address)).unwrap();
    assert_eq!(encoded["job_description"], Value::Null);
    assert_eq!(decode_job(&encoded).unwrap().description(), None);
}

#[test]
fn test_job_requires_its_own_verified_address() {
    let job = job(toronto());
    let other = Address::new("Canada", Some("Quebec"), "Montreal", None, None).unwrap();

    let err = encode_job(&job, &verified(&other)).unwrap_err();

    assert!(matches!(err, DomainError::Logic(_)));
    assert_eq!(
        err.to_string(),
        "The job address must be verified before it is stored."
    );
}

#[test]
fn test_job_invalid_columns() {
    let address = toronto();
    let mut encoded = encode_job(&job(address.clone()), &verified(&address)).unwrap();

    encoded.insert("job_minimum_compensation".to_string(), json!("90000"));
    let err = decode_job(&encoded).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The value of 'job_minimum_compensation' attribute must be an integer."
    );

    encoded.insert("job_minimum_compensation".to_string(), json!(90000));
    encoded.insert("job_stack".to_string(), json!(r#"{"rust": 1}"#));
    let err = decode_job(&encoded).unwrap_err();
    assert_eq!(err.to_string(), "The json value did not decode to a list.");

    encoded.insert("job_stack".to_string(), json!(r#"["rust","go","docker"]"#));
    encoded.insert("job_type".to_string(), json!("gig"));
    let err = decode_job(&encoded).unwrap_err();
    assert_eq!(err.to_string(), "The job type provided is not valid: gig");
}

#[test]
fn test_company_domain_round_trip() {
    let resolver = MockDnsResolver::new().with_host("acme.example", &["93.184.216.34"]);
    let verifier = job_board_core::DnsDomainNameVerifier::new(Arc::new(resolver));
    let domain = CompanyDomain::new("acme.example")
        .unwrap()
        .verify(&verifier)
        .unwrap();

    let encoded = encode_company_domain(&domain);
    assert_eq!(encoded, json!("acme.example"));
    assert_eq!(decode_company_domain(&encoded, "domain").unwrap(), domain);

    let err = decode_company_domain(&json!(12), "domain").unwrap_err();
    assert_eq!(err.to_string(), "The domain value must be a string.");
}

#[test]
fn test_link_column_is_nullable() {
    assert_eq!(decode_link(&Value::Null, "resume").unwrap(), None);
    assert_eq!(encode_link(None), Value::Null);

    let link = Link::new("https://cdn.example.com/resume.pdf").unwrap();
    let encoded = encode_link(Some(&link));
    assert_eq!(decode_link(&encoded, "resume").unwrap(), Some(link));

    let err = decode_link(&json!(["x"]), "resume").unwrap_err();
    assert_eq!(err.to_string(), "The resume value must be a string.");
}

#[test]
fn test_email_and_name_round_trip() {
    let email = Email::new("ada@example.com").unwrap();
    assert_eq!(decode_email(&encode_email(&email), "email").unwrap(), email);

    let name = Name::new("Ada", "Lovelace").unwrap();
    let encoded = encode_name(&name);
    assert_eq!(encoded["first_name"], json!("Ada"));
    assert_eq!(decode_name(&encoded).unwrap(), name);

    let err = decode_name(&row(json!({ "first_name": "Ada", "last_name": null }))).unwrap_err();
    assert_eq!(err.to_string(), "The attribute 'last_name' cannot be null.");
}
