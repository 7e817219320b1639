#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod category;
pub mod error;
pub mod score;

// Re-export main types
pub use category::{ParseCategoryError, RiskCategory, risk_category_expr};
pub use error::{Result, RiskError};
pub use score::{raw_score_expr, score_batch};
