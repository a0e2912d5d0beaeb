// crates/placefeed-core/src/source/mod.rs

//! # Reference-data loading
//!
//! [`PlaceSource`] is the seam between the exporter and the relational
//! store: three bulk reads, nothing else. [`Snapshot::load`] drives a
//! source, reports per-row progress to an observer, and assembles the
//! immutable maps the export pipeline works from.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::error::Result;
use crate::model::{City, Country, LocaleNames, Snapshot, Translation};

mod sqlite;

pub use sqlite::SqliteSource;

/// Read access to the three reference tables.
///
/// Implementations should return rows in ascending id order so repeated
/// runs observe identical row order; everything downstream of the
/// snapshot is deterministic given that.
pub trait PlaceSource {
    fn countries(&self) -> Result<Vec<Country>>;
    fn cities(&self) -> Result<Vec<City>>;
    fn translations(&self) -> Result<Vec<Translation>>;
}

/// Side-channel observer for load progress.
///
/// Called once per materialized row with a running "done / total" count.
/// Purely informational; implementations must not influence the run.
pub trait Progress {
    fn loaded(&self, entity: &str, done: usize, total: usize);
}

/// Observer that discards all progress events.
pub struct NoProgress;

impl Progress for NoProgress {
    fn loaded(&self, _entity: &str, _done: usize, _total: usize) {}
}

impl Snapshot {
    /// Materialize one read-only snapshot from `source`.
    ///
    /// Any failed read aborts the load; a partially assembled snapshot is
    /// never returned. While loading cities, the per-country primary
    /// designation is derived: the first flagged city wins and any
    /// further flagged city for the same country is ignored with a
    /// warning, preserving the at-most-one-primary rule.
    pub fn load(source: &dyn PlaceSource, progress: &dyn Progress) -> Result<Self> {
        let rows = source.countries()?;
        let total = rows.len();
        let mut countries = BTreeMap::new();
        for (done, country) in rows.into_iter().enumerate() {
            countries.insert(country.id, country);
            progress.loaded("countries", done + 1, total);
        }

        let rows = source.cities()?;
        let total = rows.len();
        let mut cities = BTreeMap::new();
        let mut primary_cities: BTreeMap<u32, u32> = BTreeMap::new();
        for (done, city) in rows.into_iter().enumerate() {
            if city.is_primary {
                if let Some(existing) = primary_cities.get(&city.country_id) {
                    warn!(
                        country_id = city.country_id,
                        kept = existing,
                        ignored = city.id,
                        "country has more than one city flagged primary"
                    );
                } else {
                    primary_cities.insert(city.country_id, city.id);
                }
            }
            cities.insert(city.id, city);
            progress.loaded("cities", done + 1, total);
        }

        let rows = source.translations()?;
        let total = rows.len();
        let mut translations: HashMap<u32, LocaleNames> = HashMap::new();
        for (done, t) in rows.into_iter().enumerate() {
            translations
                .entry(t.place_id)
                .or_default()
                .insert(t.locale, t.name);
            progress.loaded("translations", done + 1, total);
        }

        Ok(Snapshot::new(
            countries,
            cities,
            translations,
            primary_cities,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_source, MemorySource};

    #[test]
    fn builds_maps_keyed_by_id() {
        let snapshot = Snapshot::load(&sample_source(), &NoProgress).unwrap();

        assert_eq!(snapshot.country(1).unwrap().english_name, "France");
        assert_eq!(snapshot.city(10).unwrap().english_name, "Paris");
        assert_eq!(
            snapshot.translations_for(1).unwrap().get("de").unwrap(),
            "Frankreich"
        );
        assert!(snapshot.translations_for(30).is_none());
    }

    #[test]
    fn first_flagged_city_wins_primary_designation() {
        let mut source = sample_source();
        // A second city flagged primary for country 1.
        source.cities.push(City {
            id: 99,
            country_id: 1,
            english_name: "Lyon".into(),
            iata: Some("LYS".into()),
            lat: None,
            lon: None,
            time_zone: None,
            is_primary: true,
        });

        let snapshot = Snapshot::load(&source, &NoProgress).unwrap();
        assert_eq!(snapshot.primary_city_of(1).unwrap().id, 10);
        assert!(!snapshot.is_primary(snapshot.city(99).unwrap()));
    }

    #[test]
    fn later_translation_row_replaces_earlier_for_same_locale() {
        let mut source = sample_source();
        source.translations.push(Translation {
            place_id: 10,
            locale: "de".into(),
            name: "Paris (neu)".into(),
        });

        let snapshot = Snapshot::load(&source, &NoProgress).unwrap();
        assert_eq!(
            snapshot.translations_for(10).unwrap().get("de").unwrap(),
            "Paris (neu)"
        );
    }

    #[test]
    fn progress_reports_running_counts() {
        use std::cell::RefCell;

        struct Recorder(RefCell<Vec<(String, usize, usize)>>);
        impl Progress for Recorder {
            fn loaded(&self, entity: &str, done: usize, total: usize) {
                self.0.borrow_mut().push((entity.to_string(), done, total));
            }
        }

        let source = MemorySource {
            countries: vec![Country {
                id: 1,
                english_name: "France".into(),
                iata: Some("FR".into()),
            }],
            cities: Vec::new(),
            translations: Vec::new(),
        };
        let recorder = Recorder(RefCell::new(Vec::new()));
        Snapshot::load(&source, &recorder).unwrap();

        assert_eq!(
            recorder.0.into_inner(),
            vec![("countries".to_string(), 1, 1)]
        );
    }
}
