use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for placefeed
#[derive(Debug, Parser)]
#[command(
    name = "placefeed",
    version,
    about = "Export localized city/country feeds from a reference database and query them"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export the full cities feed (one record per city)
    ExportCities {
        /// Path to the SQLite reference database
        #[arg(short = 'd', long = "database")]
        database: PathBuf,

        /// Output path; a .gz extension enables gzip compression
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },

    /// Export the primary-cities feed (one record per country)
    ExportPrimary {
        /// Path to the SQLite reference database
        #[arg(short = 'd', long = "database")]
        database: PathBuf,

        /// Output path; a .gz extension enables gzip compression
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },

    /// Show row counts of the reference database
    Stats {
        /// Path to the SQLite reference database
        #[arg(short = 'd', long = "database")]
        database: PathBuf,
    },

    /// Resolve a place against previously exported feeds
    Lookup {
        /// Path to a cities feed (.json or .json.gz)
        #[arg(long = "feed")]
        feed: PathBuf,

        /// Optional primary-cities feed merged into the index
        #[arg(long = "primary-feed")]
        primary_feed: Option<PathBuf>,

        /// Country code (e.g. FR)
        #[arg(long)]
        country: Option<String>,

        /// City name in any spelling
        #[arg(long)]
        city: Option<String>,

        /// Latitude for the nearest-city fallback
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude for the nearest-city fallback
        #[arg(long)]
        lon: Option<f64>,

        /// Locale for the localized names in the answer
        #[arg(long, default_value = "en")]
        locale: String,
    },
}
