//! Error types for ledger ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ledger ingestion operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading the transaction ledger.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input file could not be opened.
    #[error("cannot open input ledger {path}: {source}")]
    OpenInput {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A required column is absent from the input header.
    #[error("input ledger is missing required column: {column}")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
    },

    /// CSV header read error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Polars read or cast error. Malformed numeric values surface here.
    #[error("ledger parse error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
