// crates/placefeed-core/src/feed/mod.rs

//! # Feed consumption
//!
//! Parses written feeds back into memory and builds a [`Locator`] over
//! them. This is the downstream half of the crate: a service that ships
//! the exported JSON can answer "where is this user" queries without
//! ever touching the relational store.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{FeedError, Result};
use crate::export::io::is_gzip;
use crate::export::{CityRecord, PrimaryRecord};

mod lookup;

pub use lookup::{Approach, Locator, LookupQuery, PlaceMatch};

/// Read the cities feed at `path` (gzipped when the extension is `.gz`).
pub fn load_cities_feed(path: impl AsRef<Path>) -> Result<Vec<CityRecord>> {
    let reader = open_stream(path.as_ref())?;
    Ok(serde_json::from_reader(reader)?)
}

/// Read the primary-cities feed at `path`.
pub fn load_primary_feed(path: impl AsRef<Path>) -> Result<Vec<PrimaryRecord>> {
    let reader = open_stream(path.as_ref())?;
    Ok(serde_json::from_reader(reader)?)
}

/// Opens a feed file, buffers it, and optionally wraps it in a gzip
/// decoder. Callers never care about the compression.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        FeedError::NotFound(format!("feed not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}
