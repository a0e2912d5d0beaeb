// crates/placefeed-core/src/export/record.rs

use serde::{Deserialize, Serialize};

/// One per-locale name pair attached to a feed record.
///
/// Both sides are always present: a missing translation row is replaced
/// by the place's own English name at build time, never by an empty
/// string or a hole in the list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub locale: String,
    pub country: String,
    pub city: String,
}

/// One denormalized row of the cities feed.
///
/// Field names and order follow the document consumed downstream; the
/// feed is an array of these objects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CityRecord {
    pub city: String,
    #[serde(default)]
    pub city_iata: Option<String>,
    pub country: String,
    #[serde(default)]
    pub country_iata: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
}

/// One row of the primary-cities feed: the designated representative
/// city of a country. Narrower than [`CityRecord`] on purpose — no
/// coordinates and no redundant primary flag.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrimaryRecord {
    pub country: String,
    #[serde(default)]
    pub country_iata: Option<String>,
    pub city: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
}
