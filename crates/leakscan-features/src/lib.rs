#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod derive;
pub mod status;

// Re-export main types
pub use derive::{
    derive_features, discount_percentage_expr, invoice_month_expr, payment_status_expr,
};
pub use status::{ParseStatusError, PaymentStatus};
