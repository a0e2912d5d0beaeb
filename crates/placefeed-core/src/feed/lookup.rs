// crates/placefeed-core/src/feed/lookup.rs

use std::collections::HashMap;

use crate::export::{CityRecord, PrimaryRecord};
use crate::text::fold_key;

/// Locale used when the requested one has no entry.
const FALLBACK_LOCALE: &str = "en";

/// Widest radius considered a usable coordinate match.
const MAX_DISTANCE_KM: f64 = 100.0;

/// How a lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// The queried city was found in the queried country.
    ExactMatch,
    /// Fell back to the country's primary city.
    PrimaryCity,
    /// Fell back to the nearest city within [`MAX_DISTANCE_KM`].
    ClosestCity,
}

impl Approach {
    pub fn as_str(&self) -> &'static str {
        match self {
            Approach::ExactMatch => "exact_match",
            Approach::PrimaryCity => "primary_city",
            Approach::ClosestCity => "closest_city",
        }
    }
}

/// A place-lookup request. All fields are optional; the fallback chain
/// uses whatever is present.
#[derive(Debug, Clone, Default)]
pub struct LookupQuery {
    /// Country code, as carried in the feeds' `country_iata` field.
    pub country_code: Option<String>,
    /// City name in any spelling; matched accent- and case-insensitively.
    pub city_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Locale for the localized names in the response.
    pub locale: Option<String>,
}

/// A resolved place with display names localized for the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceMatch {
    pub iata: Option<String>,
    pub name: String,
    pub country_name: String,
    pub timezone: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub approach: Approach,
}

#[derive(Debug)]
struct CityEntry {
    iata: Option<String>,
    name: String,
    lat: Option<f64>,
    lon: Option<f64>,
    timezone: Option<String>,
    /// locale → localized city name.
    names: HashMap<String, String>,
    country_key: String,
}

#[derive(Debug, Default)]
struct CountryEntry {
    name: String,
    /// Folded city name → index into `Locator::cities`.
    cities: HashMap<String, usize>,
    primary: Option<usize>,
    /// locale → localized country name. First record wins per locale.
    names: HashMap<String, String>,
}

/// In-memory lookup index over loaded feeds.
///
/// Built once, read-only afterwards. The fallback chain in
/// [`Locator::lookup`] mirrors the consuming service: exact city match,
/// then the country's primary city, then the nearest city by
/// great-circle distance.
#[derive(Debug, Default)]
pub struct Locator {
    countries: HashMap<String, CountryEntry>,
    cities: Vec<CityEntry>,
}

impl Locator {
    /// Index a cities feed, optionally merging a primary-cities feed.
    ///
    /// The cities feed establishes every index; the primary feed only
    /// fills the primary designation (and country entry) for countries
    /// the cities feed did not cover.
    pub fn from_feeds(cities: Vec<CityRecord>, primary: Vec<PrimaryRecord>) -> Self {
        let mut locator = Locator::default();

        for record in cities {
            locator.add_city(record);
        }
        for record in primary {
            locator.add_primary(record);
        }

        locator
    }

    fn add_city(&mut self, record: CityRecord) {
        // Records without a country code cannot be reached by any query
        // key; there is nothing useful to index.
        let Some(code) = record.country_iata.as_deref() else {
            return;
        };
        let country_key = fold_key(code);

        let country = self
            .countries
            .entry(country_key.clone())
            .or_insert_with(|| CountryEntry {
                name: record.country.clone(),
                ..CountryEntry::default()
            });

        let mut names = HashMap::new();
        for t in &record.translations {
            names.insert(t.locale.clone(), t.city.clone());
            country.names.entry(t.locale.clone()).or_insert_with(|| t.country.clone());
        }

        let index = self.cities.len();
        country.cities.insert(fold_key(&record.city), index);
        if record.is_primary {
            country.primary = Some(index);
        }

        self.cities.push(CityEntry {
            iata: record.city_iata,
            name: record.city,
            lat: record.latitude,
            lon: record.longitude,
            timezone: record.timezone,
            names,
            country_key,
        });
    }

    fn add_primary(&mut self, record: PrimaryRecord) {
        let Some(code) = record.country_iata.as_deref() else {
            return;
        };
        let country_key = fold_key(code);

        if self
            .countries
            .get(&country_key)
            .is_some_and(|c| c.primary.is_some())
        {
            return;
        }

        let country = self
            .countries
            .entry(country_key.clone())
            .or_insert_with(|| CountryEntry {
                name: record.country.clone(),
                ..CountryEntry::default()
            });

        let mut names = HashMap::new();
        for t in &record.translations {
            names.insert(t.locale.clone(), t.city.clone());
            country.names.entry(t.locale.clone()).or_insert_with(|| t.country.clone());
        }

        let index = self.cities.len();
        country.cities.entry(fold_key(&record.city)).or_insert(index);
        country.primary = Some(index);

        self.cities.push(CityEntry {
            iata: None,
            name: record.city,
            lat: None,
            lon: None,
            timezone: record.timezone,
            names,
            country_key,
        });
    }

    /// Resolve a query through the fallback chain; `None` when every
    /// stage misses.
    pub fn lookup(&self, query: &LookupQuery) -> Option<PlaceMatch> {
        if let Some(country) = query
            .country_code
            .as_deref()
            .and_then(|code| self.countries.get(&fold_key(code)))
        {
            if let Some(&index) = query
                .city_name
                .as_deref()
                .and_then(|name| country.cities.get(&fold_key(name)))
            {
                return Some(self.response(country, index, Approach::ExactMatch, query));
            }

            if let Some(index) = country.primary {
                return Some(self.response(country, index, Approach::PrimaryCity, query));
            }
        }

        let (lat, lon) = (query.latitude?, query.longitude?);
        // GeoIP reports 0,0 for an unresolvable address; never treat it
        // as a real position in the Gulf of Guinea.
        if lat == 0.0 && lon == 0.0 {
            return None;
        }

        let index = self.closest_within(lat, lon, MAX_DISTANCE_KM)?;
        let country = self.countries.get(&self.cities[index].country_key)?;
        Some(self.response(country, index, Approach::ClosestCity, query))
    }

    fn closest_within(&self, lat: f64, lon: f64, max_km: f64) -> Option<usize> {
        let mut best: Option<(f64, usize)> = None;
        for (index, city) in self.cities.iter().enumerate() {
            let (Some(city_lat), Some(city_lon)) = (city.lat, city.lon) else {
                continue;
            };
            let dist = great_circle_km((lat, lon), (city_lat, city_lon));
            if dist <= max_km && best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, index));
            }
        }
        best.map(|(_, index)| index)
    }

    fn response(
        &self,
        country: &CountryEntry,
        index: usize,
        approach: Approach,
        query: &LookupQuery,
    ) -> PlaceMatch {
        let city = &self.cities[index];
        let locale = query.locale.as_deref();

        PlaceMatch {
            iata: city.iata.clone(),
            name: localized(&city.names, locale, &city.name),
            country_name: localized(&country.names, locale, &country.name),
            timezone: city.timezone.clone(),
            coordinates: city.lat.zip(city.lon),
            approach,
        }
    }
}

/// Requested locale, then the fallback locale, then the exported
/// English name.
fn localized(names: &HashMap<String, String>, locale: Option<&str>, english: &str) -> String {
    locale
        .and_then(|l| names.get(l))
        .or_else(|| names.get(FALLBACK_LOCALE))
        .cloned()
        .unwrap_or_else(|| english.to_string())
}

fn great_circle_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;

    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TranslationEntry;

    fn entry(locale: &str, country: &str, city: &str) -> TranslationEntry {
        TranslationEntry {
            locale: locale.into(),
            country: country.into(),
            city: city.into(),
        }
    }

    fn city_record(
        city: &str,
        iata: &str,
        country: &str,
        country_iata: &str,
        coords: (f64, f64),
        is_primary: bool,
        translations: Vec<TranslationEntry>,
    ) -> CityRecord {
        CityRecord {
            city: city.into(),
            city_iata: Some(iata.into()),
            country: country.into(),
            country_iata: Some(country_iata.into()),
            latitude: Some(coords.0),
            longitude: Some(coords.1),
            timezone: Some("Europe/Paris".into()),
            is_primary,
            translations,
        }
    }

    fn sample_locator() -> Locator {
        Locator::from_feeds(
            vec![
                city_record(
                    "Paris",
                    "PAR",
                    "France",
                    "FR",
                    (48.8566, 2.3522),
                    true,
                    vec![
                        entry("ru", "Франция", "Париж"),
                        entry("en", "France", "Paris"),
                    ],
                ),
                city_record(
                    "Nice",
                    "NCE",
                    "France",
                    "FR",
                    (43.7102, 7.262),
                    false,
                    vec![entry("en", "France", "Nice")],
                ),
            ],
            vec![PrimaryRecord {
                country: "Germany".into(),
                country_iata: Some("DE".into()),
                city: "Berlin".into(),
                timezone: Some("Europe/Berlin".into()),
                translations: vec![entry("ru", "Германия", "Берлин")],
            }],
        )
    }

    #[test]
    fn exact_city_match_wins() {
        let locator = sample_locator();
        let found = locator
            .lookup(&LookupQuery {
                country_code: Some("FR".into()),
                city_name: Some("Nice".into()),
                ..LookupQuery::default()
            })
            .unwrap();

        assert_eq!(found.approach, Approach::ExactMatch);
        assert_eq!(found.iata.as_deref(), Some("NCE"));
    }

    #[test]
    fn city_names_match_across_diacritics_and_case() {
        let locator = sample_locator();
        let found = locator
            .lookup(&LookupQuery {
                country_code: Some("fr".into()),
                city_name: Some("NICE".into()),
                ..LookupQuery::default()
            })
            .unwrap();
        assert_eq!(found.approach, Approach::ExactMatch);
    }

    #[test]
    fn unknown_city_falls_back_to_primary() {
        let locator = sample_locator();
        let found = locator
            .lookup(&LookupQuery {
                country_code: Some("FR".into()),
                city_name: Some("Marseille".into()),
                ..LookupQuery::default()
            })
            .unwrap();

        assert_eq!(found.approach, Approach::PrimaryCity);
        assert_eq!(found.iata.as_deref(), Some("PAR"));
    }

    #[test]
    fn primary_feed_supplies_countries_missing_from_cities_feed() {
        let locator = sample_locator();
        let found = locator
            .lookup(&LookupQuery {
                country_code: Some("DE".into()),
                locale: Some("ru".into()),
                ..LookupQuery::default()
            })
            .unwrap();

        assert_eq!(found.approach, Approach::PrimaryCity);
        assert_eq!(found.name, "Берлин");
        assert_eq!(found.country_name, "Германия");
    }

    #[test]
    fn coordinates_fall_back_to_closest_city_within_range() {
        let locator = sample_locator();
        // Versailles: ~17 km from central Paris.
        let found = locator
            .lookup(&LookupQuery {
                latitude: Some(48.8049),
                longitude: Some(2.1204),
                ..LookupQuery::default()
            })
            .unwrap();

        assert_eq!(found.approach, Approach::ClosestCity);
        assert_eq!(found.iata.as_deref(), Some("PAR"));
    }

    #[test]
    fn far_coordinates_and_null_island_miss() {
        let locator = sample_locator();

        // Mid-Atlantic, nothing within 100 km.
        assert!(locator
            .lookup(&LookupQuery {
                latitude: Some(20.0),
                longitude: Some(-40.0),
                ..LookupQuery::default()
            })
            .is_none());

        // The GeoIP "not found" sentinel.
        assert!(locator
            .lookup(&LookupQuery {
                latitude: Some(0.0),
                longitude: Some(0.0),
                ..LookupQuery::default()
            })
            .is_none());
    }

    #[test]
    fn localized_names_fall_back_to_en_then_export_name() {
        let locator = sample_locator();
        let query = LookupQuery {
            country_code: Some("FR".into()),
            city_name: Some("Paris".into()),
            ..LookupQuery::default()
        };

        // Requested locale present.
        let found = locator
            .lookup(&LookupQuery {
                locale: Some("ru".into()),
                ..query.clone()
            })
            .unwrap();
        assert_eq!(found.name, "Париж");

        // Unknown locale: en entry.
        let found = locator
            .lookup(&LookupQuery {
                locale: Some("ja".into()),
                ..query.clone()
            })
            .unwrap();
        assert_eq!(found.name, "Paris");
        assert_eq!(found.country_name, "France");
    }

    #[test]
    fn great_circle_distance_is_plausible() {
        // Paris to Nice is roughly 685 km.
        let d = great_circle_km((48.8566, 2.3522), (43.7102, 7.262));
        assert!((600.0..750.0).contains(&d), "got {d}");
    }
}
