//! Administrative hierarchy types: levels, admin-code keys and code sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hierarchy levels resolved through configured rules.
///
/// The levels are resolved independently of each other, so the ordering here
/// is only the order in which results are reported. `Country` is not a level:
/// it is read straight off the source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyLevel {
    District,
    Borough,
    City,
    State,
}

impl HierarchyLevel {
    /// Get all levels in reporting order
    pub fn all() -> &'static [HierarchyLevel] {
        &[
            HierarchyLevel::District,
            HierarchyLevel::Borough,
            HierarchyLevel::City,
            HierarchyLevel::State,
        ]
    }

    /// Get the configuration key for this level
    pub fn field_name(&self) -> &'static str {
        match self {
            HierarchyLevel::District => "district",
            HierarchyLevel::Borough => "borough",
            HierarchyLevel::City => "city",
            HierarchyLevel::State => "state",
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for HierarchyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HierarchyLevel::all()
            .iter()
            .copied()
            .find(|level| level.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// One of the four nested admin-code slots (country → a1 → a2 → a3 → a4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AdminCodeKey {
    A1,
    A2,
    A3,
    A4,
}

impl AdminCodeKey {
    pub fn all() -> &'static [AdminCodeKey] {
        &[
            AdminCodeKey::A1,
            AdminCodeKey::A2,
            AdminCodeKey::A3,
            AdminCodeKey::A4,
        ]
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            AdminCodeKey::A1 => "a1",
            AdminCodeKey::A2 => "a2",
            AdminCodeKey::A3 => "a3",
            AdminCodeKey::A4 => "a4",
        }
    }
}

impl fmt::Display for AdminCodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for AdminCodeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminCodeKey::all()
            .iter()
            .copied()
            .find(|key| key.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Sparse admin codes attached to a location record. Any level may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCodeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a4: Option<String>,
}

impl AdminCodeSet {
    /// Set the code for a given key
    pub fn set(&mut self, key: AdminCodeKey, code: impl Into<String>) {
        let code = Some(code.into());
        match key {
            AdminCodeKey::A1 => self.a1 = code,
            AdminCodeKey::A2 => self.a2 = code,
            AdminCodeKey::A3 => self.a3 = code,
            AdminCodeKey::A4 => self.a4 = code,
        }
    }

    /// Get the code for a given key
    pub fn get(&self, key: AdminCodeKey) -> Option<&str> {
        match key {
            AdminCodeKey::A1 => self.a1.as_deref(),
            AdminCodeKey::A2 => self.a2.as_deref(),
            AdminCodeKey::A3 => self.a3.as_deref(),
            AdminCodeKey::A4 => self.a4.as_deref(),
        }
    }

    /// Iterate over the codes that are present, shallowest first
    pub fn present(&self) -> impl Iterator<Item = (AdminCodeKey, &str)> + '_ {
        AdminCodeKey::all()
            .iter()
            .filter_map(move |key| self.get(*key).map(|code| (*key, code)))
    }

    /// Builder-style setter, mostly useful in tests and fixtures
    pub fn with(mut self, key: AdminCodeKey, code: impl Into<String>) -> Self {
        self.set(key, code);
        self
    }
}
