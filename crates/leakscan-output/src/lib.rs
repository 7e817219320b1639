#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;

// Re-export main types
pub use export::{ExportError, ExportFormat, Exporter, write_csv_atomic};
pub use summary::{CategoryCount, LeakageSummary, LeakageTypeCount};
