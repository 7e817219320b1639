#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export the pipeline surface
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineReport};

// Re-export the pieces the CLI and embedders need
pub use leakscan_data::{DataError, REQUIRED_COLUMNS, load_transactions};
pub use leakscan_features::{PaymentStatus, derive_features};
pub use leakscan_output::{ExportFormat, Exporter, LeakageSummary, write_csv_atomic};
pub use leakscan_risk::{RiskCategory, RiskError, score_batch};
