//! Hierarchy rule configuration.
//!
//! The file is TOML:
//!
//! ```toml
//! [search]
//! radius_meters = 20000
//! limit = 50
//!
//! [district_match]
//! GB = "a3"
//!
//! [default.city]
//! feature_class = "P"
//! feature_codes = ["PPLC", "PPLA", "PPL"]
//! admin_codes = { a1 = "from-location" }
//!
//! [countries.DE.city]
//! feature_codes = ["PPLA", "PPLA2", "PPL"]
//!
//! [[countries.DE.city.exceptions]]
//! filter = { a1 = "16|04" }
//! feature_codes = ["PPLC", "PPLA"]
//! ```
//!
//! Values are parsed into typed form once, at load time. The loaded
//! configuration is immutable and meant to be shared behind an `Arc`.

use anyhow::{Context, Result};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{AdminCodeKey, AdminCodeSet, HierarchyLevel};
use crate::taxonomy::{self, FeatureClass, TaxonomyError};

/// Admin-code value meaning "whatever the record itself has at this level"
pub const FROM_LOCATION: &str = "from-location";

/// Admin-code literal matching an absent code
pub const NULL_CODE: &str = "null";

const BUILTIN: &str = include_str!("../../config/hierarchy.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("record has no country code")]
    CountryCodeMissing,

    #[error("configuration key '{0}' must be {1}")]
    TypeMismatch(String, &'static str),

    #[error("required configuration key '{0}' is not set")]
    MissingKey(&'static str),

    #[error("unknown hierarchy level '{0}'")]
    UnknownLevel(String),

    #[error("unknown admin code key '{0}'")]
    UnknownAdminKey(String),

    #[error("configuration key '{path}': {source}")]
    Taxonomy {
        path: String,
        #[source]
        source: TaxonomyError,
    },

    #[error("feature code {code} does not belong to class {class} ({path})")]
    FeatureCodeClass {
        path: String,
        code: String,
        class: FeatureClass,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A configured admin-code value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfiguredValue {
    Literal(String),
    FromLocation,
    OneOf(Vec<String>),
}

impl ConfiguredValue {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == FROM_LOCATION {
            ConfiguredValue::FromLocation
        } else if raw.contains('|') {
            ConfiguredValue::OneOf(split_alternatives(raw))
        } else {
            ConfiguredValue::Literal(raw.to_string())
        }
    }

    /// Accepted codes, with `from-location` replaced by the record's own code
    pub fn resolve(&self, own: Option<&str>) -> Vec<String> {
        match self {
            ConfiguredValue::Literal(code) => vec![code.clone()],
            ConfiguredValue::OneOf(codes) => codes.clone(),
            ConfiguredValue::FromLocation => vec![own.unwrap_or(NULL_CODE).to_string()],
        }
    }
}

fn split_alternatives(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Admin-code matcher: for each key, the accepted alternatives.
///
/// The literal [`NULL_CODE`] accepts a record without a code at that key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdminCodeFilter {
    codes: BTreeMap<AdminCodeKey, Vec<String>>,
}

impl AdminCodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter requiring exactly the record's own non-null codes
    pub fn from_record(codes: &AdminCodeSet) -> Self {
        Self::from_record_up_to(codes, AdminCodeKey::A4)
    }

    /// Like [`from_record`](Self::from_record), ignoring codes deeper than `deepest`
    pub fn from_record_up_to(codes: &AdminCodeSet, deepest: AdminCodeKey) -> Self {
        let mut filter = Self::new();
        for (key, code) in codes.present().filter(|(key, _)| *key <= deepest) {
            filter.insert(key, vec![code.to_string()]);
        }
        filter
    }

    pub fn insert(&mut self, key: AdminCodeKey, accepted: Vec<String>) {
        self.codes.insert(key, accepted);
    }

    pub fn get(&self, key: AdminCodeKey) -> Option<&[String]> {
        self.codes.get(&key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdminCodeKey, &[String])> + '_ {
        self.codes.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Whether every constrained key accepts the record's code
    pub fn matches(&self, codes: &AdminCodeSet) -> bool {
        self.iter().all(|(key, accepted)| {
            let own = codes.get(key);
            accepted.iter().any(|alt| match own {
                Some(code) => alt == code,
                None => alt == NULL_CODE,
            })
        })
    }
}

/// The configurable keys of a level block. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelKeys {
    pub feature_class: Option<FeatureClass>,
    pub feature_codes: Option<Vec<String>>,
    pub admin_codes: Option<BTreeMap<AdminCodeKey, ConfiguredValue>>,
    pub sort_by_feature_codes: Option<bool>,
    pub sort_by_population: Option<bool>,
    pub must_match_admin_codes: Option<bool>,
    pub visible: Option<bool>,
    pub with_population: Option<bool>,
    pub use_coordinate: Option<bool>,
}

impl LevelKeys {
    fn is_empty(&self) -> bool {
        *self == LevelKeys::default()
    }
}

/// Override activated when a record's admin codes match `filter`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExceptionRule {
    pub filter: AdminCodeFilter,
    pub overrides: LevelKeys,
}

/// Configuration of one level, for one country or the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelBlock {
    pub keys: LevelKeys,
    pub exceptions: Vec<ExceptionRule>,
}

/// Level blocks of one country (or of the default entry)
pub type CountryBlock = HashMap<HierarchyLevel, LevelBlock>;

/// Parameters for candidate retrieval through the spatial store
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    pub radius_meters: f64,
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_meters: 20_000.0,
            limit: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    search: SearchSettings,
    #[serde(default)]
    district_match: BTreeMap<String, String>,
    #[serde(default)]
    default: BTreeMap<String, toml::Table>,
    #[serde(default)]
    countries: BTreeMap<String, BTreeMap<String, toml::Table>>,
}

/// Loaded, immutable hierarchy configuration.
#[derive(Debug, Clone, Default)]
pub struct HierarchyConfig {
    default: CountryBlock,
    countries: HashMap<String, CountryBlock>,
    district_match: HashMap<String, AdminCodeKey>,
    search: SearchSettings,
}

impl HierarchyConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context("Failed to read hierarchy config file")?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse hierarchy config {}", path.display()))?;
        Ok(config)
    }

    /// The configuration shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let default = parse_country_block("default", &raw.default)?;

        let mut countries = HashMap::new();
        for (code, levels) in &raw.countries {
            let code = code.trim().to_ascii_uppercase();
            let block = parse_country_block(&format!("countries.{}", code), levels)?;
            countries.insert(code, block);
        }

        let mut district_match = HashMap::new();
        for (code, key) in &raw.district_match {
            let key = key
                .parse::<AdminCodeKey>()
                .map_err(ConfigError::UnknownAdminKey)?;
            district_match.insert(code.trim().to_ascii_uppercase(), key);
        }

        info!(
            "Loaded hierarchy config: {} default levels, {} countries, {} district matches",
            default.len(),
            countries.len(),
            district_match.len()
        );

        Ok(Self {
            default,
            countries,
            district_match,
            search: raw.search,
        })
    }

    pub fn default_block(&self) -> &CountryBlock {
        &self.default
    }

    pub fn country_block(&self, country: &str) -> Option<&CountryBlock> {
        self.countries.get(country.trim().to_ascii_uppercase().as_str())
    }

    /// Configured country codes, sorted
    pub fn countries(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.countries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Deepest admin-code level copied from the record when a level must
    /// match the record's own codes (a4 unless configured)
    pub fn district_match_key(&self, country: Option<&str>) -> AdminCodeKey {
        country
            .and_then(|c| {
                self.district_match
                    .get(c.trim().to_ascii_uppercase().as_str())
                    .copied()
            })
            .unwrap_or(AdminCodeKey::A4)
    }

    pub fn search(&self) -> &SearchSettings {
        &self.search
    }
}

fn parse_country_block(
    path: &str,
    levels: &BTreeMap<String, toml::Table>,
) -> Result<CountryBlock, ConfigError> {
    let mut block = CountryBlock::new();
    for (name, table) in levels {
        let level = name
            .parse::<HierarchyLevel>()
            .map_err(|_| ConfigError::UnknownLevel(format!("{}.{}", path, name)))?;
        let level_path = format!("{}.{}", path, level);
        block.insert(level, parse_level_block(&level_path, table)?);
    }
    Ok(block)
}

fn parse_level_block(path: &str, table: &toml::Table) -> Result<LevelBlock, ConfigError> {
    let mut exceptions = Vec::new();
    if let Some(value) = table.get("exceptions") {
        let key = format!("{}.exceptions", path);
        let items = value
            .as_array()
            .ok_or_else(|| ConfigError::TypeMismatch(key.clone(), "an array of tables"))?;
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", key, i);
            let item = item
                .as_table()
                .ok_or_else(|| ConfigError::TypeMismatch(item_path.clone(), "a table"))?;
            exceptions.push(parse_exception(&item_path, item)?);
        }
    }

    let keys = parse_level_keys(path, table, &["exceptions"])?;
    check_feature_codes(path, &keys)?;
    if matches!(&keys.feature_codes, Some(codes) if codes.is_empty()) {
        warn!("{}.feature_codes is empty; the level can never match", path);
    }

    Ok(LevelBlock { keys, exceptions })
}

fn parse_exception(path: &str, table: &toml::Table) -> Result<ExceptionRule, ConfigError> {
    let mut filter = AdminCodeFilter::new();
    if let Some(value) = table.get("filter") {
        let filter_path = format!("{}.filter", path);
        let entries = value
            .as_table()
            .ok_or_else(|| ConfigError::TypeMismatch(filter_path.clone(), "a table"))?;
        for (name, code) in entries {
            let key = name
                .parse::<AdminCodeKey>()
                .map_err(|n| ConfigError::UnknownAdminKey(format!("{}.{}", filter_path, n)))?;
            let code = code.as_str().ok_or_else(|| {
                ConfigError::TypeMismatch(format!("{}.{}", filter_path, name), "a string")
            })?;
            filter.insert(key, split_alternatives(code));
        }
    }

    let overrides = parse_level_keys(path, table, &["filter"])?;
    check_feature_codes(path, &overrides)?;
    if overrides.is_empty() {
        warn!("{} overrides nothing", path);
    }

    Ok(ExceptionRule { filter, overrides })
}

fn parse_level_keys(
    path: &str,
    table: &toml::Table,
    structural: &[&str],
) -> Result<LevelKeys, ConfigError> {
    let mut keys = LevelKeys::default();
    for (name, value) in table {
        let key_path = format!("{}.{}", path, name);
        match name.as_str() {
            "feature_class" => {
                let class = value
                    .as_str()
                    .and_then(|s| s.parse::<FeatureClass>().ok())
                    .ok_or_else(|| ConfigError::TypeMismatch(key_path, "a feature class letter"))?;
                keys.feature_class = Some(class);
            }
            "feature_codes" => {
                let codes = value
                    .as_array()
                    .and_then(|items| {
                        items
                            .iter()
                            .map(|v| v.as_str().map(|s| s.trim().to_ascii_uppercase()))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or_else(|| ConfigError::TypeMismatch(key_path, "an array of strings"))?;
                keys.feature_codes = Some(codes);
            }
            "admin_codes" => keys.admin_codes = Some(parse_admin_codes(&key_path, value)?),
            "sort_by_feature_codes" => {
                keys.sort_by_feature_codes = Some(expect_bool(key_path, value)?)
            }
            "sort_by_population" => keys.sort_by_population = Some(expect_bool(key_path, value)?),
            "must_match_admin_codes" => {
                keys.must_match_admin_codes = Some(expect_bool(key_path, value)?)
            }
            "visible" => keys.visible = Some(expect_bool(key_path, value)?),
            "with_population" => keys.with_population = Some(expect_bool(key_path, value)?),
            "use_coordinate" => keys.use_coordinate = Some(expect_bool(key_path, value)?),
            other if structural.contains(&other) => {}
            _ => warn!("Ignoring unknown configuration key {}", key_path),
        }
    }
    Ok(keys)
}

/// Every configured code must be a known feature code, and a member of the
/// class configured alongside it. Classes set in another layer are checked
/// when the layers are merged.
fn check_feature_codes(path: &str, keys: &LevelKeys) -> Result<(), ConfigError> {
    let Some(codes) = &keys.feature_codes else {
        return Ok(());
    };
    for code in codes {
        let class = taxonomy::class_of(code).map_err(|source| ConfigError::Taxonomy {
            path: format!("{}.feature_codes", path),
            source,
        })?;
        match keys.feature_class {
            Some(expected) if expected != class => {
                return Err(ConfigError::FeatureCodeClass {
                    path: format!("{}.feature_codes", path),
                    code: code.clone(),
                    class: expected,
                })
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_admin_codes(
    path: &str,
    value: &toml::Value,
) -> Result<BTreeMap<AdminCodeKey, ConfiguredValue>, ConfigError> {
    let entries = value
        .as_table()
        .ok_or_else(|| ConfigError::TypeMismatch(path.to_string(), "a table"))?;

    let mut codes = BTreeMap::new();
    for (name, code) in entries {
        let key = name
            .parse::<AdminCodeKey>()
            .map_err(|n| ConfigError::UnknownAdminKey(format!("{}.{}", path, n)))?;
        let code = code
            .as_str()
            .ok_or_else(|| ConfigError::TypeMismatch(format!("{}.{}", path, name), "a string"))?;
        codes.insert(key, ConfiguredValue::parse(code));
    }
    Ok(codes)
}

fn expect_bool(key: String, value: &toml::Value) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or(ConfigError::TypeMismatch(key, "a boolean"))
}
