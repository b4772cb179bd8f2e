//! Placetree - administrative hierarchy resolution for gazetteer records
//!
//! This library provides the geometry codec, the feature taxonomy and the
//! configurable district / borough / city / state resolver shared by the
//! services built on top of it.

pub mod geometry;
pub mod hierarchy;
pub mod models;
pub mod names;
pub mod taxonomy;

pub use geometry::{decode_geometry, encode_geometry, Geometry, Point};
pub use hierarchy::{HierarchyBuilder, HierarchyConfig, HierarchyError, Language};
pub use models::{HierarchyLevel, HierarchyResult, LocationRecord};
pub use taxonomy::{classify, FeatureClass};
