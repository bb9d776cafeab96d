//! Verification services and the collaborator traits they depend on.
//!
//! Value objects only see the traits in [`traits`]; the implementations
//! here combine them with reference data, DNS and HTTP.

mod address_verifier;
mod dns;
mod domain_name_verifier;
mod link_verifier;
mod technology_catalog;
pub mod traits;

pub use address_verifier::DefaultAddressVerifier;
pub use dns::SystemDnsResolver;
pub use domain_name_verifier::DnsDomainNameVerifier;
pub use link_verifier::{is_unsafe_ip, DefaultLinkVerifier, ACCEPTED_CONTENT_TYPES};
pub use technology_catalog::{TechnologyCatalog, VALID_TECHNOLOGIES_KEY};
pub use traits::{
    AddressValidator, AddressVerifier, DnsRecords, DnsResolver, DomainNameVerifier, Geocoder,
    HttpProbe, LinkVerifier, ProbeResponse,
};
