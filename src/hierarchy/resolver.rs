//! Effective rule set for a (record, level) pair.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::config::{AdminCodeFilter, ConfigError, HierarchyConfig, LevelBlock, LevelKeys};
use crate::models::{HierarchyLevel, LocationRecord};
use crate::taxonomy::{self, FeatureClass};

/// Fully resolved configuration for one level of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRuleSet {
    pub level: HierarchyLevel,
    pub feature_class: FeatureClass,
    /// Ordered; the order matters when `sort_by_feature_codes` is set
    pub feature_codes: Vec<String>,
    pub admin_codes: AdminCodeFilter,
    pub sort_by_feature_codes: bool,
    pub sort_by_population: bool,
    pub must_match_admin_codes: bool,
    pub visible: bool,
    pub with_population: Option<bool>,
    pub use_coordinate: bool,
}

impl LevelRuleSet {
    pub fn has_feature_code(&self, code: &str) -> bool {
        self.feature_code_rank(code).is_some()
    }

    /// Position of `code` in the configured order
    pub fn feature_code_rank(&self, code: &str) -> Option<usize> {
        self.feature_codes
            .iter()
            .position(|c| c.eq_ignore_ascii_case(code))
    }

    /// Whether the record passes the `with_population` restriction
    pub fn accepts_population(&self, record: &LocationRecord) -> bool {
        match self.with_population {
            Some(true) => record.population_or_zero() > 0,
            Some(false) => record.population_or_zero() == 0,
            None => true,
        }
    }
}

/// Resolves level rules from the shared configuration.
#[derive(Debug, Clone)]
pub struct HierarchyConfigResolver {
    config: Arc<HierarchyConfig>,
}

impl HierarchyConfigResolver {
    pub fn new(config: Arc<HierarchyConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    pub fn resolve(
        &self,
        record: &LocationRecord,
        level: HierarchyLevel,
    ) -> Result<LevelRuleSet, ConfigError> {
        let country = record
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::CountryCodeMissing)?;

        let default_block = self.config.default_block().get(&level);
        let block: Option<&LevelBlock> = match self
            .config
            .country_block(country)
            .and_then(|b| b.get(&level))
        {
            Some(block) => Some(block),
            None => {
                debug!("No {} rules for {}, using default", level, country);
                default_block
            }
        };

        let exception = block.and_then(|b| {
            b.exceptions
                .iter()
                .position(|e| e.filter.matches(&record.admin_codes))
                .map(|i| {
                    debug!("Record {} matches {} exception #{} for {}", record.id, level, i, country);
                    &b.exceptions[i].overrides
                })
        });

        let layers = [exception, block.map(|b| &b.keys), default_block.map(|b| &b.keys)];
        let pick = |get: fn(&LevelKeys) -> Option<bool>| layers.iter().flatten().find_map(|k| get(k));

        let feature_class = layers
            .iter()
            .flatten()
            .find_map(|k| k.feature_class)
            .ok_or(ConfigError::MissingKey("feature_class"))?;
        let feature_codes = layers
            .iter()
            .flatten()
            .find_map(|k| k.feature_codes.clone())
            .ok_or(ConfigError::MissingKey("feature_codes"))?;
        if let Some(code) = feature_codes
            .iter()
            .find(|code| !taxonomy::is_member(code, feature_class))
        {
            return Err(ConfigError::FeatureCodeClass {
                path: format!("{}.{}", country, level),
                code: code.clone(),
                class: feature_class,
            });
        }

        let must_match_admin_codes = pick(|k| k.must_match_admin_codes).unwrap_or(false);
        let admin_codes = if must_match_admin_codes {
            let deepest = self.config.district_match_key(Some(country));
            AdminCodeFilter::from_record_up_to(&record.admin_codes, deepest)
        } else {
            let mut filter = AdminCodeFilter::new();
            if let Some(configured) = layers.iter().flatten().find_map(|k| k.admin_codes.as_ref()) {
                for (key, value) in configured {
                    filter.insert(*key, value.resolve(record.admin_codes.get(*key)));
                }
            }
            filter
        };

        let rules = LevelRuleSet {
            level,
            feature_class,
            feature_codes,
            admin_codes,
            sort_by_feature_codes: pick(|k| k.sort_by_feature_codes).unwrap_or(false),
            sort_by_population: pick(|k| k.sort_by_population).unwrap_or(false),
            must_match_admin_codes,
            visible: pick(|k| k.visible).unwrap_or(true),
            with_population: pick(|k| k.with_population),
            use_coordinate: pick(|k| k.use_coordinate).unwrap_or(true),
        };

        debug!(
            "Resolved {} rules for record {} ({}): class {}, codes {:?}",
            level, record.id, country, rules.feature_class, rules.feature_codes
        );

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::hierarchy::config::NULL_CODE;
    use crate::models::AdminCodeKey;

    const RULES: &str = r#"
        [default.state]
        feature_class = "A"
        feature_codes = ["ADM1"]
        admin_codes = { a1 = "from-location" }

        [default.city]
        feature_class = "P"
        feature_codes = ["PPLC", "PPL"]
        sort_by_population = true
        admin_codes = { a1 = "from-location", a2 = "01|02" }

        [default.district]
        feature_class = "P"
        feature_codes = ["PPLX"]

        [countries.DE.city]
        feature_codes = ["PPLA", "PPL"]
        visible = false

        [[countries.DE.city.exceptions]]
        filter = { a1 = "07" }
        feature_codes = ["PPLA2"]

        [[countries.DE.city.exceptions]]
        filter = { a1 = "16|04" }
        feature_codes = ["PPLC"]
        sort_by_feature_codes = true
        admin_codes = { a3 = "999" }

        [[countries.DE.city.exceptions]]
        filter = { a1 = "16" }
        feature_codes = ["PPLL"]

        [countries.DE.borough]
        feature_class = "A"
        feature_codes = ["ADM4"]
        admin_codes = { a1 = "05" }
        must_match_admin_codes = true

        [countries.XX.district]
        sort_by_population = true

        [countries.AT.city]
        admin_codes = { a2 = "900" }

        [[countries.AT.city.exceptions]]
        filter = { a1 = "09" }
        admin_codes = { a2 = "901", a3 = "90101" }
        must_match_admin_codes = true

        [countries.GB.borough]
        feature_class = "A"
        feature_codes = ["ADM4"]
        must_match_admin_codes = true

        [countries.YY.city]
        feature_class = "A"

        [district_match]
        GB = "a3"
    "#;

    fn resolver() -> HierarchyConfigResolver {
        HierarchyConfigResolver::new(Arc::new(HierarchyConfig::from_toml_str(RULES).unwrap()))
    }

    fn record(country: Option<&str>) -> LocationRecord {
        let mut r = LocationRecord::new(
            1,
            "Mitte",
            FeatureClass::P,
            "PPLX",
            Point::wgs84(52.52, 13.40).unwrap(),
        );
        r.country = country.map(String::from);
        r
    }

    #[test]
    fn test_missing_country() {
        let err = resolver()
            .resolve(&record(None), HierarchyLevel::City)
            .unwrap_err();
        assert!(matches!(err, ConfigError::CountryCodeMissing));

        let err = resolver()
            .resolve(&record(Some("  ")), HierarchyLevel::City)
            .unwrap_err();
        assert!(matches!(err, ConfigError::CountryCodeMissing));
    }

    #[test]
    fn test_country_without_level_falls_back_to_default() {
        let resolver = resolver();
        let de = record(Some("DE")).with_admin_code(AdminCodeKey::A1, "09");
        let unknown = record(Some("ZZ")).with_admin_code(AdminCodeKey::A1, "09");

        let from_de = resolver.resolve(&de, HierarchyLevel::State).unwrap();
        let from_default = resolver.resolve(&unknown, HierarchyLevel::State).unwrap();
        assert_eq!(from_de, from_default);
        assert_eq!(from_de.feature_codes, vec!["ADM1"]);
        assert!(from_de.visible);
        assert_eq!(from_de.with_population, None);
        assert!(!from_de.must_match_admin_codes);
        assert!(from_de.use_coordinate);
    }

    #[test]
    fn test_country_block_overrides_default_per_key() {
        let rules = resolver()
            .resolve(&record(Some("de")), HierarchyLevel::City)
            .unwrap();

        assert_eq!(rules.feature_codes, vec!["PPLA", "PPL"]);
        assert!(!rules.visible);
        // not set for DE, inherited from default
        assert_eq!(rules.feature_class, FeatureClass::P);
        assert!(rules.sort_by_population);
    }

    #[test]
    fn test_first_matching_exception_wins() {
        let berlin = record(Some("DE")).with_admin_code(AdminCodeKey::A1, "16");
        let rules = resolver().resolve(&berlin, HierarchyLevel::City).unwrap();

        assert_eq!(rules.feature_codes, vec!["PPLC"]);
        assert!(rules.sort_by_feature_codes);
        // exception beats the country block and the default block
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A3), Some(&["999".to_string()][..]));
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A1), None);
        // keys the exception leaves alone come from the lower layers
        assert!(!rules.visible);
        assert!(rules.sort_by_population);
    }

    #[test]
    fn test_no_exception_match_is_not_an_error() {
        let bavaria = record(Some("DE")).with_admin_code(AdminCodeKey::A1, "02");
        let rules = resolver().resolve(&bavaria, HierarchyLevel::City).unwrap();
        assert_eq!(rules.feature_codes, vec!["PPLA", "PPL"]);
    }

    #[test]
    fn test_from_location_substitution() {
        let resolver = resolver();
        let with_a1 = record(Some("FR")).with_admin_code(AdminCodeKey::A1, "11");
        let rules = resolver.resolve(&with_a1, HierarchyLevel::City).unwrap();
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A1), Some(&["11".to_string()][..]));
        assert_eq!(
            rules.admin_codes.get(AdminCodeKey::A2),
            Some(&["01".to_string(), "02".to_string()][..])
        );

        let without = record(Some("FR"));
        let rules = resolver.resolve(&without, HierarchyLevel::City).unwrap();
        assert_eq!(
            rules.admin_codes.get(AdminCodeKey::A1),
            Some(&[NULL_CODE.to_string()][..])
        );
    }

    #[test]
    fn test_must_match_uses_record_codes() {
        let mitte = record(Some("DE"))
            .with_admin_code(AdminCodeKey::A1, "16")
            .with_admin_code(AdminCodeKey::A3, "11000")
            .with_admin_code(AdminCodeKey::A4, "11000000");
        let rules = resolver().resolve(&mitte, HierarchyLevel::Borough).unwrap();

        assert!(rules.must_match_admin_codes);
        assert_eq!(rules.admin_codes, AdminCodeFilter::from_record(&mitte.admin_codes));
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A1), Some(&["16".to_string()][..]));
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A2), None);
    }

    #[test]
    fn test_must_match_beats_exception_admin_codes() {
        let vienna = record(Some("AT"))
            .with_admin_code(AdminCodeKey::A1, "09")
            .with_admin_code(AdminCodeKey::A2, "01")
            .with_admin_code(AdminCodeKey::A4, "90001");
        let rules = resolver().resolve(&vienna, HierarchyLevel::City).unwrap();

        assert!(rules.must_match_admin_codes);
        assert_eq!(rules.admin_codes, AdminCodeFilter::from_record(&vienna.admin_codes));
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A3), None);

        // outside the exception the configured codes apply
        let graz = record(Some("AT")).with_admin_code(AdminCodeKey::A1, "06");
        let rules = resolver().resolve(&graz, HierarchyLevel::City).unwrap();
        assert!(!rules.must_match_admin_codes);
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A2), Some(&["900".to_string()][..]));
    }

    #[test]
    fn test_must_match_stops_at_district_match_level() {
        let soho = record(Some("GB"))
            .with_admin_code(AdminCodeKey::A1, "ENG")
            .with_admin_code(AdminCodeKey::A3, "E09000033")
            .with_admin_code(AdminCodeKey::A4, "E05000644");
        let rules = resolver().resolve(&soho, HierarchyLevel::Borough).unwrap();

        assert_eq!(
            rules.admin_codes,
            AdminCodeFilter::from_record_up_to(&soho.admin_codes, AdminCodeKey::A3)
        );
        assert_eq!(rules.admin_codes.get(AdminCodeKey::A4), None);
        assert_eq!(
            rules.admin_codes.get(AdminCodeKey::A3),
            Some(&["E09000033".to_string()][..])
        );
    }

    #[test]
    fn test_merged_class_and_codes_must_agree() {
        // YY sets class A while the PPL codes come from the default block
        let err = resolver()
            .resolve(&record(Some("YY")), HierarchyLevel::City)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FeatureCodeClass { ref code, class: FeatureClass::A, .. } if code == "PPLC"
        ));
    }

    #[test]
    fn test_missing_required_keys() {
        // borough exists nowhere for XX or default
        let err = resolver()
            .resolve(&record(Some("XX")), HierarchyLevel::Borough)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("feature_class")));

        // XX.district only sets a sort flag; the rest comes from default
        let rules = resolver()
            .resolve(&record(Some("XX")), HierarchyLevel::District)
            .unwrap();
        assert!(rules.sort_by_population);
        assert_eq!(rules.feature_codes, vec!["PPLX"]);
    }

    #[test]
    fn test_with_population_filter() {
        let mut rules = resolver()
            .resolve(&record(Some("ZZ")), HierarchyLevel::City)
            .unwrap();
        let empty = record(Some("ZZ"));
        let populated = record(Some("ZZ")).with_population(10);

        assert!(rules.accepts_population(&empty));
        rules.with_population = Some(true);
        assert!(!rules.accepts_population(&empty));
        assert!(rules.accepts_population(&populated));
        rules.with_population = Some(false);
        assert!(rules.accepts_population(&empty));
        assert!(!rules.accepts_population(&populated));
    }
}
