use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds raised while bringing the dataset into memory
// ---------------------------------------------------------------------------

/// The file could not be turned into a table at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot build data frame: {0}")]
    Frame(#[from] PolarsError),

    /// No header row, or a header row with no records after it.
    #[error("no data to load")]
    Empty,
}

/// The table was read but does not have the shape the dashboard needs.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: hour {hour} is outside 0-23")]
    HourOutOfRange { row: usize, hour: u8 },
}

/// Anything that makes the dashboard unable to render.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to load dataset: {0}")]
    Load(#[from] LoadError),

    #[error("dataset schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("aggregation failed: {0}")]
    Aggregate(#[from] PolarsError),
}
