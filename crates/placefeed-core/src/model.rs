// crates/placefeed-core/src/model.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A country row as read from the backing store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub english_name: String,
    pub iata: Option<String>,
}

/// A city row as read from the backing store.
///
/// `is_primary` is the raw per-row flag; the at-most-one-per-country
/// business rule is enforced when the [`Snapshot`] is assembled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub country_id: u32,
    pub english_name: String,
    pub iata: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub time_zone: Option<String>,
    pub is_primary: bool,
}

/// A localized name for a place (either a city or a country; the id
/// spaces are shared and disambiguated only by which table the id
/// resolves in).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Translation {
    pub place_id: u32,
    pub locale: String,
    pub name: String,
}

/// Locale code → localized name, sorted by locale for deterministic
/// iteration.
pub type LocaleNames = BTreeMap<String, String>;

/// Immutable in-memory materialization of the reference data for one
/// export run.
///
/// Built once by [`Snapshot::load`](crate::source), read thereafter, and
/// discarded when the run ends. All lookups are local to this value;
/// there is no process-wide registry.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    countries: BTreeMap<u32, Country>,
    cities: BTreeMap<u32, City>,
    translations: HashMap<u32, LocaleNames>,
    /// country id → id of its designated primary city.
    primary_cities: BTreeMap<u32, u32>,
    translation_rows: usize,
}

impl Snapshot {
    pub(crate) fn new(
        countries: BTreeMap<u32, Country>,
        cities: BTreeMap<u32, City>,
        translations: HashMap<u32, LocaleNames>,
        primary_cities: BTreeMap<u32, u32>,
        translation_rows: usize,
    ) -> Self {
        Self {
            countries,
            cities,
            translations,
            primary_cities,
            translation_rows,
        }
    }

    /// All countries in ascending id order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.countries.values()
    }

    /// All cities in ascending id order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn country(&self, id: u32) -> Option<&Country> {
        self.countries.get(&id)
    }

    pub fn city(&self, id: u32) -> Option<&City> {
        self.cities.get(&id)
    }

    /// Localized names recorded for a place, if any row exists for it.
    pub fn translations_for(&self, place_id: u32) -> Option<&LocaleNames> {
        self.translations.get(&place_id)
    }

    /// The designated primary city of a country, if one is flagged.
    pub fn primary_city_of(&self, country_id: u32) -> Option<&City> {
        let id = self.primary_cities.get(&country_id)?;
        self.cities.get(id)
    }

    /// Whether this city is its country's designated primary city.
    pub fn is_primary(&self, city: &City) -> bool {
        self.primary_cities.get(&city.country_id) == Some(&city.id)
    }

    pub fn stats(&self) -> SourceStats {
        SourceStats {
            countries: self.countries.len(),
            cities: self.cities.len(),
            translations: self.translation_rows,
        }
    }
}

/// Simple aggregate statistics for one loaded snapshot.
///
/// `translations` counts source rows, not distinct places.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SourceStats {
    pub countries: usize,
    pub cities: usize,
    pub translations: usize,
}
