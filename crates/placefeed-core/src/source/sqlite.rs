// crates/placefeed-core/src/source/sqlite.rs

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::{FeedError, Result};
use crate::model::{City, Country, Translation};

use super::PlaceSource;

/// [`PlaceSource`] backed by a SQLite reference database.
///
/// The connection is opened read-only: the export is a pure read pass and
/// must never create or mutate the store. Expected tables:
///
/// ```sql
/// countries(id, english_name, iata)
/// cities(id, country_id, english_name, iata, lat, lon, time_zone, is_primary)
/// place_translations(place_id, locale, name)
/// ```
#[derive(Debug)]
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open the database at `path`, failing if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            FeedError::NotFound(format!("reference database not found at {}: {}", path.display(), e))
        })?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection (used by tests with in-memory
    /// databases).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl PlaceSource for SqliteSource {
    fn countries(&self) -> Result<Vec<Country>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, english_name, iata FROM countries ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Country {
                id: row.get(0)?,
                english_name: row.get(1)?,
                iata: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn cities(&self) -> Result<Vec<City>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, country_id, english_name, iata, lat, lon, time_zone, is_primary \
             FROM cities ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(City {
                id: row.get(0)?,
                country_id: row.get(1)?,
                english_name: row.get(2)?,
                iata: row.get(3)?,
                lat: row.get(4)?,
                lon: row.get(5)?,
                time_zone: row.get(6)?,
                is_primary: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn translations(&self) -> Result<Vec<Translation>> {
        let mut stmt = self.conn.prepare(
            "SELECT place_id, locale, name FROM place_translations ORDER BY place_id, locale",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Translation {
                place_id: row.get(0)?,
                locale: row.get(1)?,
                name: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
