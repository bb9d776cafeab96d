//! Domain value objects and types.
//!
//! Each value object validates its input at construction time, so an
//! instance is always well-formed. Address, CompanyDomain, Link and
//! TechStack can additionally be checked against the outside world; a
//! successful check yields a [`Verified`] wrapper.

pub mod address;
pub mod company_domain;
pub mod email;
pub mod errors;
pub mod job;
pub mod job_compensation;
pub mod job_description;
pub mod job_title;
pub mod link;
pub mod location;
pub mod name;
pub mod status;
pub mod tech_stack;
pub mod verified;

pub use address::Address;
pub use company_domain::CompanyDomain;
pub use email::Email;
pub use errors::{DomainError, DomainResult, VerificationError, VerificationKind};
pub use job::{Job, JobType};
pub use job_compensation::{CompensationCurrency, CompensationType, JobCompensation};
pub use job_description::{Education, JobDescription};
pub use job_title::JobTitle;
pub use link::Link;
pub use location::{GeocodingOutcome, LocationType};
pub use name::Name;
pub use status::{JobApplicationStatus, JobPostingStatus};
pub use tech_stack::TechStack;
pub use verified::Verified;
