//! Batch pipeline orchestration: load, derive, score, summarize, write.

use std::path::PathBuf;

use polars::prelude::IntoLazy;
use thiserror::Error;

use leakscan_data::{DataError, load_transactions};
use leakscan_features::derive_features;
use leakscan_output::{ExportError, LeakageSummary, write_csv_atomic};
use leakscan_risk::{RiskError, score_batch};

/// Errors surfaced by a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Ledger ingestion failed.
    #[error("ingestion failed: {0}")]
    Data(#[from] DataError),

    /// Risk scoring failed.
    #[error("scoring failed: {0}")]
    Risk(#[from] RiskError),

    /// Writing the output artifact or summary failed.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Where the pipeline reads from and writes to.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path of the raw transaction ledger.
    pub input: PathBuf,

    /// Path for the enriched output artifact.
    pub output: PathBuf,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Number of records processed (input and output row counts match).
    pub records: usize,

    /// Path of the written artifact.
    pub output: PathBuf,

    /// Leakage summary over the scored batch.
    pub summary: LeakageSummary,
}

/// The whole batch transform, load to artifact.
///
/// One synchronous in-memory pass; the atomic write of the output artifact
/// is the sole state mutation. Running twice on identical input bytes yields
/// identical output bytes.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline for the given paths.
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline end to end.
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        let raw = load_transactions(&self.config.input)?;
        let records = raw.height();
        log::info!(
            "loaded {} transactions from {}",
            records,
            self.config.input.display()
        );

        let derived = derive_features(raw.lazy());
        let mut scored = score_batch(derived)?;
        let summary = LeakageSummary::from_frame(&scored)?;

        write_csv_atomic(&mut scored, &self.config.output)?;
        log::info!(
            "wrote {} enriched records to {}",
            scored.height(),
            self.config.output.display()
        );

        Ok(PipelineReport {
            records,
            output: self.config.output.clone(),
            summary,
        })
    }
}
