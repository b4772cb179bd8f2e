//! Location records and the assembled hierarchy result.

use serde::{Deserialize, Serialize};

use super::{AdminCodeKey, AdminCodeSet, HierarchyLevel};
use crate::geometry::Point;
use crate::taxonomy::FeatureClass;

/// A gazetteer entry as produced by the ingestion side.
///
/// Records are read-only to the resolver, with a single exception: the
/// district population backfill performed while looking up a district's
/// city (see `HierarchyBuilder`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,

    /// Canonical name
    pub name: String,

    pub feature_class: FeatureClass,

    pub feature_code: String,

    /// ISO 3166-1 alpha-2 country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default)]
    pub admin_codes: AdminCodeSet,

    pub coordinate: Point,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl LocationRecord {
    /// Create a record with minimal required fields
    pub fn new(
        id: i64,
        name: &str,
        feature_class: FeatureClass,
        feature_code: &str,
        coordinate: Point,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            feature_class,
            feature_code: feature_code.to_string(),
            country: None,
            admin_codes: AdminCodeSet::default(),
            coordinate,
            population: None,
        }
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub fn with_admin_code(mut self, key: AdminCodeKey, code: &str) -> Self {
        self.admin_codes.set(key, code);
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Population with unknown treated as zero
    pub fn population_or_zero(&self) -> u64 {
        self.population.unwrap_or(0)
    }

    /// Whether both records carry the same, present admin code at `key`
    pub fn shares_admin_code(&self, other: &LocationRecord, key: AdminCodeKey) -> bool {
        match (self.admin_codes.get(key), other.admin_codes.get(key)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// A record selected for a hierarchy level, with its localized display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub display_name: String,
    pub record: LocationRecord,
}

/// Country entry, taken from the source record rather than rule matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub code: String,

    /// Localized display name, absent when the localization store has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The enclosing administrative chain of a source record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<ResolvedPlace>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub borough: Option<ResolvedPlace>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<ResolvedPlace>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ResolvedPlace>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryEntry>,
}

impl HierarchyResult {
    /// Set the entry for a given level
    pub fn set(&mut self, level: HierarchyLevel, place: Option<ResolvedPlace>) {
        match level {
            HierarchyLevel::District => self.district = place,
            HierarchyLevel::Borough => self.borough = place,
            HierarchyLevel::City => self.city = place,
            HierarchyLevel::State => self.state = place,
        }
    }

    /// Get the entry for a given level
    pub fn get(&self, level: HierarchyLevel) -> Option<&ResolvedPlace> {
        match level {
            HierarchyLevel::District => self.district.as_ref(),
            HierarchyLevel::Borough => self.borough.as_ref(),
            HierarchyLevel::City => self.city.as_ref(),
            HierarchyLevel::State => self.state.as_ref(),
        }
    }
}
