//! Error type for the I/O edge of the crate.
//!
//! Detection itself never fails; only loading series data does.

use std::path::PathBuf;

/// Errors raised while loading series data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read series file {}: {source}", path.display())]
    SeriesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid series map: {0}")]
    InvalidSeriesMap(String),
}

pub type Result<T> = std::result::Result<T, Error>;
