//! Display names for location records.

use std::sync::Arc;
use tracing::debug;

use crate::hierarchy::NameStore;
use crate::models::LocationRecord;

/// Resolves a localized display name, falling back to the canonical name.
#[derive(Clone)]
pub struct NameResolver {
    store: Arc<dyn NameStore>,
}

impl NameResolver {
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        Self { store }
    }

    /// Never fails: any absence degrades to `record.name`
    pub fn resolve(
        &self,
        record: &LocationRecord,
        iso_language: Option<&str>,
        language_tag: Option<&str>,
    ) -> String {
        let Some(language) = iso_language.map(str::trim).filter(|l| !l.is_empty()) else {
            return record.name.clone();
        };

        match self.store.alternate_name(record, language, language_tag) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                debug!(
                    "No '{}' name for record {}, using canonical name",
                    language, record.id
                );
                record.name.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::hierarchy::Unavailable;
    use crate::taxonomy::FeatureClass;

    struct GermanOnly;

    impl NameStore for GermanOnly {
        fn alternate_name(
            &self,
            record: &LocationRecord,
            iso_language: &str,
            language_tag: Option<&str>,
        ) -> Option<String> {
            match (record.id, iso_language, language_tag) {
                (1, "de", Some("colloquial")) => Some("Bärlin".into()),
                (1, "de", _) => Some("Berlin (Hauptstadt)".into()),
                (2, "de", _) => Some("   ".into()),
                _ => None,
            }
        }
    }

    fn record(id: i64) -> LocationRecord {
        LocationRecord::new(
            id,
            "Berlin",
            FeatureClass::P,
            "PPLC",
            Point::wgs84(52.52, 13.40).unwrap(),
        )
    }

    #[test]
    fn test_alternate_name_used_when_present() {
        let names = NameResolver::new(Arc::new(GermanOnly));
        assert_eq!(names.resolve(&record(1), Some("de"), None), "Berlin (Hauptstadt)");
        assert_eq!(
            names.resolve(&record(1), Some("de"), Some("colloquial")),
            "Bärlin"
        );
    }

    #[test]
    fn test_falls_back_to_canonical_name() {
        let names = NameResolver::new(Arc::new(GermanOnly));
        assert_eq!(names.resolve(&record(1), Some("fr"), None), "Berlin");
        assert_eq!(names.resolve(&record(1), None, None), "Berlin");
        assert_eq!(names.resolve(&record(1), Some(""), None), "Berlin");
        assert_eq!(names.resolve(&record(2), Some("de"), None), "Berlin");

        let offline = NameResolver::new(Arc::new(Unavailable));
        assert_eq!(offline.resolve(&record(1), Some("de"), None), "Berlin");
    }
}
