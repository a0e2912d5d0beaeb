// crates/placefeed-core/src/export/mod.rs

//! # Feed building
//!
//! Denormalizes a loaded [`Snapshot`] into the two feed products:
//!
//! - **Cities feed** — one record per city, with the data-quality gate:
//!   a city that has no translation rows for itself or for its parent
//!   country is skipped with a diagnostic.
//! - **Primary-cities feed** — one record per country that has a
//!   designated primary city, included unconditionally.
//!
//! Both feeds share one translation policy: the emitted locales are the
//! union of the city's and the country's translation locales in
//! lexicographic order, and a missing row for either side falls back to
//! that place's own English name. Records are emitted in source-id order,
//! so re-running against unchanged data produces byte-identical output.

pub(crate) mod io;
mod record;

pub use io::write_feed;
pub use record::{CityRecord, PrimaryRecord, TranslationEntry};

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::model::{City, Country, LocaleNames, Snapshot};

/// Outcome counts of one feed export.
#[derive(Debug, Clone, Copy)]
pub struct ExportReport {
    /// Records serialized into the feed.
    pub written: usize,
    /// Source entities with no record: gated cities in the cities feed,
    /// countries without a primary city in the primary feed.
    pub skipped: usize,
}

/// Build the cities feed: every city joined with its parent country and
/// enriched with per-locale name pairs.
pub fn build_city_records(snapshot: &Snapshot) -> Vec<CityRecord> {
    let mut records = Vec::new();
    for city in snapshot.cities() {
        // Referential integrity is assumed upstream; a dangling parent id
        // only loses that row.
        let Some(country) = snapshot.country(city.country_id) else {
            warn!(
                city = %city.english_name,
                country_id = city.country_id,
                "city references an unknown country, skipping"
            );
            continue;
        };

        let (Some(city_names), Some(country_names)) = (
            snapshot.translations_for(city.id),
            snapshot.translations_for(country.id),
        ) else {
            warn!(
                city = %city.english_name,
                country = %country.english_name,
                "translations not found, skipping"
            );
            continue;
        };

        records.push(CityRecord {
            city: city.english_name.clone(),
            city_iata: city.iata.clone(),
            country: country.english_name.clone(),
            country_iata: country.iata.clone(),
            latitude: city.lat,
            longitude: city.lon,
            timezone: city.time_zone.clone(),
            is_primary: snapshot.is_primary(city),
            translations: translation_entries(city, country, city_names, country_names),
        });
    }
    records
}

/// Build the primary-cities feed: each country's designated city, no
/// gate. Countries without a primary city are excluded.
pub fn build_primary_records(snapshot: &Snapshot) -> Vec<PrimaryRecord> {
    let empty = LocaleNames::new();
    let mut records = Vec::new();
    for country in snapshot.countries() {
        let Some(city) = snapshot.primary_city_of(country.id) else {
            continue;
        };

        let city_names = snapshot.translations_for(city.id).unwrap_or(&empty);
        let country_names = snapshot.translations_for(country.id).unwrap_or(&empty);

        records.push(PrimaryRecord {
            country: country.english_name.clone(),
            country_iata: country.iata.clone(),
            city: city.english_name.clone(),
            timezone: city.time_zone.clone(),
            translations: translation_entries(city, country, city_names, country_names),
        });
    }
    records
}

/// Build and atomically write the cities feed to `path`.
pub fn export_cities(snapshot: &Snapshot, path: &Path) -> Result<ExportReport> {
    let records = build_city_records(snapshot);
    write_feed(&records, path)?;
    let report = ExportReport {
        written: records.len(),
        skipped: snapshot.stats().cities - records.len(),
    };
    info!(
        path = %path.display(),
        written = report.written,
        skipped = report.skipped,
        "cities feed written"
    );
    Ok(report)
}

/// Build and atomically write the primary-cities feed to `path`.
pub fn export_primary(snapshot: &Snapshot, path: &Path) -> Result<ExportReport> {
    let records = build_primary_records(snapshot);
    write_feed(&records, path)?;
    let report = ExportReport {
        written: records.len(),
        skipped: snapshot.stats().countries - records.len(),
    };
    info!(
        path = %path.display(),
        written = report.written,
        skipped = report.skipped,
        "primary-cities feed written"
    );
    Ok(report)
}

/// Per-locale name pairs over the union of both locale sets, falling
/// back to each side's English name independently.
fn translation_entries(
    city: &City,
    country: &Country,
    city_names: &LocaleNames,
    country_names: &LocaleNames,
) -> Vec<TranslationEntry> {
    let locales: BTreeSet<&str> = city_names
        .keys()
        .chain(country_names.keys())
        .map(String::as_str)
        .collect();

    locales
        .into_iter()
        .map(|locale| TranslationEntry {
            locale: locale.to_string(),
            country: country_names
                .get(locale)
                .cloned()
                .unwrap_or_else(|| country.english_name.clone()),
            city: city_names
                .get(locale)
                .cloned()
                .unwrap_or_else(|| city.english_name.clone()),
        })
        .collect()
}
