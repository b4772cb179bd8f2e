//! Feature classes and feature codes.
//!
//! Every feature code belongs to exactly one of nine feature classes. The
//! table is static data; this module only offers lookups over it.

mod table;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("unknown feature {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
}

impl TaxonomyError {
    fn code(value: &str) -> Self {
        TaxonomyError::Unknown {
            kind: "code",
            value: value.to_string(),
        }
    }

    fn class(value: &str) -> Self {
        TaxonomyError::Unknown {
            kind: "class",
            value: value.to_string(),
        }
    }
}

/// Top-level feature classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum FeatureClass {
    /// Country, state, region
    A,
    /// Stream, lake
    H,
    /// Parks, area
    L,
    /// City, village
    P,
    /// Road, railroad
    R,
    /// Spot, building, farm
    S,
    /// Mountain, hill, rock
    T,
    /// Undersea
    U,
    /// Forest, heath
    V,
}

impl FeatureClass {
    pub fn all() -> &'static [FeatureClass] {
        &[
            FeatureClass::A,
            FeatureClass::H,
            FeatureClass::L,
            FeatureClass::P,
            FeatureClass::R,
            FeatureClass::S,
            FeatureClass::T,
            FeatureClass::U,
            FeatureClass::V,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureClass::A => "A",
            FeatureClass::H => "H",
            FeatureClass::L => "L",
            FeatureClass::P => "P",
            FeatureClass::R => "R",
            FeatureClass::S => "S",
            FeatureClass::T => "T",
            FeatureClass::U => "U",
            FeatureClass::V => "V",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureClass::A => "country, state, region",
            FeatureClass::H => "stream, lake",
            FeatureClass::L => "parks, area",
            FeatureClass::P => "city, village",
            FeatureClass::R => "road, railroad",
            FeatureClass::S => "spot, building, farm",
            FeatureClass::T => "mountain, hill, rock",
            FeatureClass::U => "undersea",
            FeatureClass::V => "forest, heath",
        }
    }
}

impl fmt::Display for FeatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureClass {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FeatureClass::all()
            .iter()
            .copied()
            .find(|class| class.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TaxonomyError::class(s))
    }
}

/// One entry of the feature-code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureCode {
    pub code: &'static str,
    pub class: FeatureClass,
    /// English label, used for display ordering and autocomplete
    pub label: &'static str,
}

/// Autocomplete hit. Ranking is left to the caller, so relevance is always 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutocompleteItem {
    pub code: &'static str,
    pub class: FeatureClass,
    pub label: &'static str,
    pub relevance: u32,
}

static BY_CODE: Lazy<HashMap<&'static str, &'static FeatureCode>> = Lazy::new(|| {
    table::ALL
        .iter()
        .flat_map(|codes| codes.iter())
        .map(|fc| (fc.code, fc))
        .collect()
});

/// Look up a feature code entry
pub fn lookup(code: &str) -> Result<&'static FeatureCode, TaxonomyError> {
    BY_CODE
        .get(code.trim().to_ascii_uppercase().as_str())
        .copied()
        .ok_or_else(|| TaxonomyError::code(code))
}

/// Class a feature code belongs to
pub fn class_of(code: &str) -> Result<FeatureClass, TaxonomyError> {
    lookup(code).map(|fc| fc.class)
}

/// Same as [`class_of`]; the name used by callers classifying records
pub fn classify(feature_code: &str) -> Result<FeatureClass, TaxonomyError> {
    class_of(feature_code)
}

/// All codes of a class, ordered by label for display
pub fn codes_of(class: FeatureClass) -> Vec<&'static FeatureCode> {
    let mut codes: Vec<&'static FeatureCode> = table::ALL
        .iter()
        .flat_map(|codes| codes.iter())
        .filter(|fc| fc.class == class)
        .collect();
    codes.sort_by(|a, b| a.label.cmp(b.label).then(a.code.cmp(b.code)));
    codes
}

/// Whether `code` is a known code of `class`
pub fn is_member(code: &str, class: FeatureClass) -> bool {
    class_of(code).map(|c| c == class).unwrap_or(false)
}

/// Every code whose raw code or label contains `query`, case-insensitively
pub fn autocomplete(query: &str) -> Vec<AutocompleteItem> {
    let needle = query.trim().to_lowercase();
    table::ALL
        .iter()
        .flat_map(|codes| codes.iter())
        .filter(|fc| {
            fc.code.to_lowercase().contains(&needle) || fc.label.to_lowercase().contains(&needle)
        })
        .map(|fc| AutocompleteItem {
            code: fc.code,
            class: fc.class,
            label: fc.label,
            relevance: 0,
        })
        .collect()
}
