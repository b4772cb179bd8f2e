//! Assembly of the district / borough / city / state / country chain.
//!
//! The source record is either a district-type place (its code is one of the
//! district rule set's `feature_codes`) or an admin place (one of the city
//! rule set's codes). The other levels are picked from the candidate list or
//! from the spatial store's containment lookups. A district and its city
//! are linked through their fourth-order admin code.

use hashbrown::HashSet;
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::config::{ConfigError, HierarchyConfig};
use super::resolver::{HierarchyConfigResolver, LevelRuleSet};
use super::store::{CandidateQuery, Collaborators};
use crate::models::{
    AdminCodeKey, CountryEntry, HierarchyLevel, HierarchyResult, LocationRecord, ResolvedPlace,
};
use crate::names::NameResolver;
use crate::taxonomy;

/// Admin-code level shared by a district and its city
const DISTRICT_CITY_KEY: AdminCodeKey = AdminCodeKey::A4;

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("feature code '{0}' is neither a district nor an admin place code")]
    UnsupportedFeatureCode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Requested language for display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Language {
    /// ISO 639 code used for alternate names
    pub iso: Option<String>,
    /// Preferred tag within that language, e.g. "colloquial"
    pub tag: Option<String>,
}

impl Language {
    pub fn new(iso: &str) -> Self {
        Self {
            iso: Some(iso.to_string()),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Language for country names, English when none was requested
    pub fn ui(&self) -> &str {
        self.iso
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("en")
    }
}

/// Builds hierarchy results for source records.
#[derive(Clone)]
pub struct HierarchyBuilder {
    rules: HierarchyConfigResolver,
    collaborators: Collaborators,
    names: NameResolver,
}

impl HierarchyBuilder {
    pub fn new(config: Arc<HierarchyConfig>, collaborators: Collaborators) -> Self {
        let names = NameResolver::new(collaborators.names.clone());
        Self {
            rules: HierarchyConfigResolver::new(config),
            collaborators,
            names,
        }
    }

    pub fn rules(&self) -> &HierarchyConfigResolver {
        &self.rules
    }

    /// Spatial store request for the candidates of one level
    pub fn candidate_query(
        &self,
        record: &LocationRecord,
        level: HierarchyLevel,
    ) -> Result<CandidateQuery, ConfigError> {
        let rules = self.rules.resolve(record, level)?;
        Ok(self.query_for(record, &rules))
    }

    fn query_for(&self, record: &LocationRecord, rules: &LevelRuleSet) -> CandidateQuery {
        let search = self.rules.config().search();
        CandidateQuery {
            point: rules.use_coordinate.then_some(record.coordinate),
            radius_meters: search.radius_meters,
            feature_class: rules.feature_class,
            feature_codes: rules.feature_codes.clone(),
            country: record.country.clone(),
            admin_codes: rules.admin_codes.clone(),
            with_population: rules.with_population,
            limit: search.limit,
        }
    }

    /// Fetch candidates for every visible level, then resolve the hierarchy
    pub fn resolve_nearby(
        &self,
        source: &mut LocationRecord,
        language: &Language,
    ) -> Result<HierarchyResult, HierarchyError> {
        let mut seen = HashSet::new();
        seen.insert(source.id);

        let mut candidates = Vec::new();
        for level in [
            HierarchyLevel::District,
            HierarchyLevel::Borough,
            HierarchyLevel::City,
        ] {
            let rules = self.rules.resolve(source, level)?;
            if !rules.visible {
                debug!("Skipping hidden {} level for record {}", level, source.id);
                continue;
            }

            let found = self
                .collaborators
                .spatial
                .find_candidates_near(&self.query_for(source, &rules));
            debug!(
                "{} {} candidates near record {}",
                found.len(),
                level,
                source.id
            );
            candidates.extend(found.into_iter().filter(|c| seen.insert(c.id)));
        }

        self.resolve_hierarchy(source, &candidates, language)
    }

    /// Assemble the hierarchy of `source` from pre-fetched candidates.
    ///
    /// `source` may have its population overwritten, see
    /// [`backfill_district_population_from_city`].
    pub fn resolve_hierarchy(
        &self,
        source: &mut LocationRecord,
        candidates: &[LocationRecord],
        language: &Language,
    ) -> Result<HierarchyResult, HierarchyError> {
        let district_rules = self.rules.resolve(source, HierarchyLevel::District)?;
        let borough_rules = self.rules.resolve(source, HierarchyLevel::Borough)?;
        let city_rules = self.rules.resolve(source, HierarchyLevel::City)?;
        let state_rules = self.rules.resolve(source, HierarchyLevel::State)?;

        let (district, city) = if district_rules.has_feature_code(&source.feature_code) {
            let city = self.find_city_for_district(source, candidates, &city_rules);
            (Some(source.clone()), city)
        } else if city_rules.has_feature_code(&source.feature_code) {
            let district = select_candidate(candidates, &district_rules, |c| {
                c.id != source.id && c.shares_admin_code(source, DISTRICT_CITY_KEY)
            });
            (district.cloned(), Some(source.clone()))
        } else {
            return Err(HierarchyError::UnsupportedFeatureCode(
                source.feature_code.clone(),
            ));
        };

        let borough = select_candidate(candidates, &borough_rules, |c| {
            c.id != source.id && borough_rules.admin_codes.matches(&c.admin_codes)
        })
        .cloned();

        let state = if state_rules.visible {
            self.collaborators.spatial.find_state_containing(source)
        } else {
            None
        };

        let mut result = HierarchyResult::default();
        for (rules, record) in [
            (&district_rules, district),
            (&borough_rules, borough),
            (&city_rules, city),
            (&state_rules, state),
        ] {
            if !rules.visible {
                if let Some(hidden) = record {
                    debug!("Hiding {} {} ({})", rules.level, hidden.id, hidden.name);
                }
                continue;
            }
            let place = record.map(|record| ResolvedPlace {
                display_name: self.names.resolve(
                    &record,
                    language.iso.as_deref(),
                    language.tag.as_deref(),
                ),
                record,
            });
            result.set(rules.level, place);
        }

        let collides = matches!(
            (result.get(HierarchyLevel::District), result.get(HierarchyLevel::City)),
            (Some(d), Some(c)) if d.display_name == c.display_name
        );
        if collides {
            debug!(
                "District and city of record {} share a name, dropping district",
                source.id
            );
            result.district = None;
        }

        result.country = source
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|code| CountryEntry {
                code: code.to_ascii_uppercase(),
                name: self
                    .collaborators
                    .localization
                    .country_display_name(code, language.ui()),
            });

        debug!(
            "Hierarchy for record {}: district={} borough={} city={} state={}",
            source.id,
            result.district.is_some(),
            result.borough.is_some(),
            result.city.is_some(),
            result.state.is_some()
        );

        Ok(result)
    }

    fn find_city_for_district(
        &self,
        district: &mut LocationRecord,
        candidates: &[LocationRecord],
        city_rules: &LevelRuleSet,
    ) -> Option<LocationRecord> {
        if let Some(city) = self
            .collaborators
            .spatial
            .find_city_containing_district(district)
        {
            debug!("City of district {} found by containment: {}", district.id, city.id);
            return Some(city);
        }

        let same_area = |c: &LocationRecord| {
            c.id != district.id && c.shares_admin_code(district, DISTRICT_CITY_KEY)
        };
        if let Some(city) = select_candidate(candidates, city_rules, &same_area) {
            return Some(city.clone());
        }

        let city = candidates
            .iter()
            .find(|c| c.population_or_zero() > 0 && same_area(*c))?
            .clone();
        backfill_district_population_from_city(district, &city);
        Some(city)
    }
}

/// Overwrite the district's population with its city's.
///
/// Only used when the city was found through the populated-place fallback.
pub fn backfill_district_population_from_city(district: &mut LocationRecord, city: &LocationRecord) {
    debug!(
        "Backfilling population of district {} from city {}: {:?} -> {:?}",
        district.id, city.id, district.population, city.population
    );
    district.population = city.population;
}

/// Best candidate for a level according to its rule set.
///
/// With `sort_by_feature_codes` candidates rank by the configured code order,
/// with `sort_by_population` by descending population (after the code rank).
/// Remaining ties keep the input order.
fn select_candidate<'a>(
    candidates: &'a [LocationRecord],
    rules: &LevelRuleSet,
    accept: impl Fn(&LocationRecord) -> bool,
) -> Option<&'a LocationRecord> {
    candidates
        .iter()
        .filter(|c| {
            c.feature_class == rules.feature_class
                && taxonomy::is_member(&c.feature_code, rules.feature_class)
        })
        .filter(|c| rules.accepts_population(c))
        .filter(|c| accept(*c))
        .filter_map(|c| rules.feature_code_rank(&c.feature_code).map(|rank| (rank, c)))
        .min_by_key(|(rank, c)| {
            let rank = if rules.sort_by_feature_codes { *rank } else { 0 };
            let population = if rules.sort_by_population {
                c.population_or_zero()
            } else {
                0
            };
            (rank, Reverse(population))
        })
        .map(|(_, c)| c)
}
