//! Collaborator interfaces the hierarchy builder depends on.
//!
//! Implementations live outside this crate (a spatial database, a name
//! table, a localization catalogue). Lookups are synchronous from the
//! builder's point of view. "Not found", timeouts and empty results are all
//! reported as absence; none of them is an error for the caller.

use serde::Serialize;
use std::sync::Arc;

use super::config::AdminCodeFilter;
use crate::geometry::Point;
use crate::models::LocationRecord;
use crate::taxonomy::FeatureClass;

/// Request for candidate records near a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateQuery {
    /// Anchor; `None` when the level is configured not to use the coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
    pub radius_meters: f64,
    pub feature_class: FeatureClass,
    pub feature_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub admin_codes: AdminCodeFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_population: Option<bool>,
    pub limit: usize,
}

/// Spatial data store.
pub trait SpatialStore: Send + Sync {
    /// Candidates matching the query, nearest first
    fn find_candidates_near(&self, query: &CandidateQuery) -> Vec<LocationRecord>;

    fn find_city_containing_district(&self, district: &LocationRecord) -> Option<LocationRecord>;

    fn find_state_containing(&self, record: &LocationRecord) -> Option<LocationRecord>;
}

/// Alternate-name store.
pub trait NameStore: Send + Sync {
    fn alternate_name(
        &self,
        record: &LocationRecord,
        iso_language: &str,
        language_tag: Option<&str>,
    ) -> Option<String>;
}

/// Localized country names.
pub trait LocalizationStore: Send + Sync {
    fn country_display_name(&self, country_code: &str, ui_language: &str) -> Option<String>;
}

/// Stand-in for collaborators that are not wired up: every lookup is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl SpatialStore for Unavailable {
    fn find_candidates_near(&self, _query: &CandidateQuery) -> Vec<LocationRecord> {
        Vec::new()
    }

    fn find_city_containing_district(&self, _district: &LocationRecord) -> Option<LocationRecord> {
        None
    }

    fn find_state_containing(&self, _record: &LocationRecord) -> Option<LocationRecord> {
        None
    }
}

impl NameStore for Unavailable {
    fn alternate_name(&self, _: &LocationRecord, _: &str, _: Option<&str>) -> Option<String> {
        None
    }
}

impl LocalizationStore for Unavailable {
    fn country_display_name(&self, _: &str, _: &str) -> Option<String> {
        None
    }
}

/// The external services used during one hierarchy resolution.
#[derive(Clone)]
pub struct Collaborators {
    pub spatial: Arc<dyn SpatialStore>,
    pub names: Arc<dyn NameStore>,
    pub localization: Arc<dyn LocalizationStore>,
}

impl Collaborators {
    pub fn new(
        spatial: Arc<dyn SpatialStore>,
        names: Arc<dyn NameStore>,
        localization: Arc<dyn LocalizationStore>,
    ) -> Self {
        Self {
            spatial,
            names,
            localization,
        }
    }

    /// Only the spatial store is available; names fall back to canonical ones
    pub fn spatial_only(spatial: Arc<dyn SpatialStore>) -> Self {
        Self::new(spatial, Arc::new(Unavailable), Arc::new(Unavailable))
    }

    /// Nothing is available
    pub fn offline() -> Self {
        Self::spatial_only(Arc::new(Unavailable))
    }
}
