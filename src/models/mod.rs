//! Core data models for hierarchy resolution.

pub mod admin;
pub mod place;

pub use admin::{AdminCodeKey, AdminCodeSet, HierarchyLevel};
pub use place::{CountryEntry, HierarchyResult, LocationRecord, ResolvedPlace};
