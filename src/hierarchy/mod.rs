//! Administrative hierarchy resolution.
//!
//! [`HierarchyConfig`] holds the per-country rules, [`HierarchyConfigResolver`]
//! turns them into a [`LevelRuleSet`] for one record and level, and
//! [`HierarchyBuilder`] assembles the final [`HierarchyResult`](crate::models::HierarchyResult).

pub mod builder;
pub mod config;
pub mod resolver;
pub mod store;

pub use builder::{
    backfill_district_population_from_city, HierarchyBuilder, HierarchyError, Language,
};
pub use config::{
    AdminCodeFilter, ConfigError, ConfiguredValue, ExceptionRule, HierarchyConfig, LevelBlock,
    LevelKeys, SearchSettings,
};
pub use resolver::{HierarchyConfigResolver, LevelRuleSet};
pub use store::{
    CandidateQuery, Collaborators, LocalizationStore, NameStore, SpatialStore, Unavailable,
};
