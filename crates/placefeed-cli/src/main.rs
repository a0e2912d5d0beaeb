//! placefeed — command-line front-end for placefeed-core
//!
//! Batch-exports localized city/country feeds out of a SQLite reference
//! database and resolves place lookups against feeds that were exported
//! earlier.
//!
//! Usage examples
//! --------------
//!
//! - Export the full cities feed (gzipped):
//!   $ placefeed export-cities -d places.db -o configs/cities.json.gz
//!
//! - Export the primary-cities feed:
//!   $ placefeed export-primary -d places.db -o configs/primary_cities.json
//!
//! - Show source table counts:
//!   $ placefeed stats -d places.db
//!
//! - Resolve a place from exported feeds:
//!   $ placefeed lookup --feed configs/cities.json.gz --country FR \
//!       --city paris --locale ru
//!
//! Diagnostics (skipped records, duplicate primary flags) go through
//! `tracing`; set RUST_LOG to adjust verbosity.

mod args;

use std::path::Path;

use clap::Parser;
use placefeed_core::export::{export_cities, export_primary, ExportReport};
use placefeed_core::feed::{load_cities_feed, load_primary_feed, Locator, LookupQuery};
use placefeed_core::source::{Progress, SqliteSource};
use placefeed_core::Snapshot;

use crate::args::{CliArgs, Commands};

/// Console progress reporter: running "N / total" per loaded entity set,
/// throttled so large tables do not flood the terminal.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn loaded(&self, entity: &str, done: usize, total: usize) {
        if done % 5000 == 0 || done == total {
            eprintln!("{entity} -> memory: {done}/{total}");
        }
    }
}

fn load_snapshot(database: &Path) -> anyhow::Result<Snapshot> {
    let source = SqliteSource::open(database)?;
    Ok(Snapshot::load(&source, &ConsoleProgress)?)
}

fn print_report(feed: &str, output: &Path, report: ExportReport) {
    println!(
        "{feed}: {} records -> {} ({} skipped)",
        report.written,
        output.display(),
        report.skipped
    );
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placefeed_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        Commands::ExportCities { database, output } => {
            let snapshot = load_snapshot(&database)?;
            let report = export_cities(&snapshot, &output)?;
            print_report("cities feed", &output, report);
        }

        Commands::ExportPrimary { database, output } => {
            let snapshot = load_snapshot(&database)?;
            let report = export_primary(&snapshot, &output)?;
            print_report("primary-cities feed", &output, report);
        }

        Commands::Stats { database } => {
            let stats = load_snapshot(&database)?.stats();
            println!("Reference database statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Cities: {}", stats.cities);
            println!("  Translations: {}", stats.translations);
        }

        Commands::Lookup {
            feed,
            primary_feed,
            country,
            city,
            lat,
            lon,
            locale,
        } => {
            let cities = load_cities_feed(&feed)?;
            let primary = match primary_feed {
                Some(path) => load_primary_feed(&path)?,
                None => Vec::new(),
            };
            let locator = Locator::from_feeds(cities, primary);

            let query = LookupQuery {
                country_code: country,
                city_name: city,
                latitude: lat,
                longitude: lon,
                locale: Some(locale),
            };

            match locator.lookup(&query) {
                Some(place) => {
                    println!("Name: {}", place.name);
                    println!("Country: {}", place.country_name);
                    println!("IATA: {}", place.iata.as_deref().unwrap_or("-"));
                    println!("Timezone: {}", place.timezone.as_deref().unwrap_or("-"));
                    if let Some((lat, lon)) = place.coordinates {
                        println!("Coordinates: {lat}:{lon}");
                    }
                    println!("Approach: {}", place.approach.as_str());
                }
                None => {
                    eprintln!("No place matched the query");
                }
            }
        }
    }

    Ok(())
}
