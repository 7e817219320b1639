//! Error types for risk scoring.

use thiserror::Error;

/// Result type for risk scoring operations.
pub type Result<T> = std::result::Result<T, RiskError>;

/// Errors that can occur while scoring a batch.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Polars evaluation error. A derived column absent from the input frame
    /// surfaces here.
    #[error("risk scoring error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
