// crates/placefeed-core/src/error.rs

use thiserror::Error;

/// Errors produced while loading source data, exporting feeds, or
/// resolving lookups.
///
/// Every source-side failure is fatal for the run: the exporter never
/// writes a partial feed, so callers can simply re-run after fixing the
/// underlying problem.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A read against the backing relational store failed.
    #[error("source query failed: {0}")]
    Source(#[from] rusqlite::Error),

    /// Filesystem-level failure (opening, writing, or renaming a feed).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Feed (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A referenced entity is missing, e.g. a feed file that does not
    /// exist at the given path.
    #[error("{0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
