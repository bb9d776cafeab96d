//! Helpers shared by value objects, verifiers and the persistence boundary.

pub mod attributes;
pub mod regions;
pub mod validators;

pub use attributes::{get_attribute, AttributeKind};
pub use regions::{RegionRepository, StaticRegionRepository};
