// crates/placefeed-core/src/lib.rs

//! # placefeed-core
//!
//! Exports localized city/country reference data into denormalized JSON
//! feeds, and loads those feeds back to answer place-lookup queries.
//!
//! The pipeline is a single linear batch pass: a [`source::PlaceSource`]
//! is materialized into an immutable [`Snapshot`], the snapshot is
//! denormalized into feed records by the [`export`] module, and the
//! resulting document is written atomically to disk. The [`feed`] module
//! is the consuming side: it parses a written feed and builds a
//! [`Locator`] for exact / primary-city / nearest-coordinate lookups.

pub mod error;
pub mod export;
pub mod feed;
pub mod model;
pub mod source;
pub mod text;

// Re-exports
pub use crate::error::{FeedError, Result};
pub use crate::export::{
    build_city_records, build_primary_records, export_cities, export_primary, CityRecord,
    ExportReport, PrimaryRecord, TranslationEntry,
};
pub use crate::feed::{load_cities_feed, load_primary_feed, Approach, Locator, LookupQuery, PlaceMatch};
pub use crate::model::{City, Country, Snapshot, SourceStats, Translation};
pub use crate::source::{NoProgress, PlaceSource, Progress, SqliteSource};
pub use crate::text::fold_key;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::error::Result;
    use crate::model::{City, Country, Translation};
    use crate::source::PlaceSource;

    /// In-memory source for unit tests.
    pub struct MemorySource {
        pub countries: Vec<Country>,
        pub cities: Vec<City>,
        pub translations: Vec<Translation>,
    }

    impl PlaceSource for MemorySource {
        fn countries(&self) -> Result<Vec<Country>> {
            Ok(self.countries.clone())
        }

        fn cities(&self) -> Result<Vec<City>> {
            Ok(self.cities.clone())
        }

        fn translations(&self) -> Result<Vec<Translation>> {
            Ok(self.translations.clone())
        }
    }

    fn country(id: u32, name: &str, iata: Option<&str>) -> Country {
        Country {
            id,
            english_name: name.to_string(),
            iata: iata.map(str::to_string),
        }
    }

    fn city(
        id: u32,
        country_id: u32,
        name: &str,
        iata: Option<&str>,
        coords: Option<(f64, f64)>,
        tz: Option<&str>,
        is_primary: bool,
    ) -> City {
        City {
            id,
            country_id,
            english_name: name.to_string(),
            iata: iata.map(str::to_string),
            lat: coords.map(|c| c.0),
            lon: coords.map(|c| c.1),
            time_zone: tz.map(str::to_string),
            is_primary,
        }
    }

    fn translation(place_id: u32, locale: &str, name: &str) -> Translation {
        Translation {
            place_id,
            locale: locale.to_string(),
            name: name.to_string(),
        }
    }

    /// Three countries, four cities, mixed translation coverage:
    ///
    /// - France (1): Paris (10, primary), Nice (11). Country translated
    ///   into fr/de; Paris only into de; Nice has no rows at all.
    /// - Germany (2): Berlin (20, primary). Country translated into ru;
    ///   Berlin into ru and es.
    /// - Nauru (3): Yaren (30, no primary flag anywhere, no rows).
    pub fn sample_source() -> MemorySource {
        MemorySource {
            countries: vec![
                country(1, "France", Some("FR")),
                country(2, "Germany", Some("DE")),
                country(3, "Nauru", None),
            ],
            cities: vec![
                city(
                    10,
                    1,
                    "Paris",
                    Some("PAR"),
                    Some((48.8566, 2.3522)),
                    Some("Europe/Paris"),
                    true,
                ),
                city(
                    11,
                    1,
                    "Nice",
                    Some("NCE"),
                    Some((43.7102, 7.262)),
                    Some("Europe/Paris"),
                    false,
                ),
                city(
                    20,
                    2,
                    "Berlin",
                    Some("BER"),
                    Some((52.52, 13.405)),
                    Some("Europe/Berlin"),
                    true,
                ),
                city(30, 3, "Yaren", None, None, Some("Pacific/Nauru"), false),
            ],
            translations: vec![
                translation(1, "fr", "France"),
                translation(1, "de", "Frankreich"),
                translation(2, "ru", "Германия"),
                translation(10, "de", "Paris"),
                translation(20, "ru", "Берлин"),
                translation(20, "es", "Berlín"),
            ],
        }
    }
}
