#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

// Re-export main types
pub use error::{DataError, Result};
pub use loader::load_transactions;
pub use schema::{DATE_COLUMNS, REQUIRED_COLUMNS};
