//! Input schema for the raw transaction ledger.
//!
//! The ledger is a comma-delimited file with a header row. Every column listed
//! in [`REQUIRED_COLUMNS`] must be present; extra columns pass through
//! untouched. Date columns are read as text and parsed by the loader so that
//! malformed dates become null instead of aborting the run, while the monetary
//! columns are read as `Float64` directly so that malformed numbers abort.

use polars::prelude::*;

use crate::error::{DataError, Result};

/// Columns that must be present in the input ledger.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "invoice_id",
    "customer_id",
    "salesperson_id",
    "region",
    "payment_method",
    "invoice_date",
    "due_date",
    "payment_date",
    "amount_billed",
    "discount",
    "amount_received",
    "is_duplicate",
    "is_leaked",
    "leakage_type",
];

/// Calendar columns parsed into `Date` by the loader.
pub const DATE_COLUMNS: [&str; 3] = ["invoice_date", "due_date", "payment_date"];

/// Check that every required column appears in the header.
///
/// Fails fast with the first missing column, before any row is processed.
pub fn validate_columns(header: &[String]) -> Result<()> {
    for required in REQUIRED_COLUMNS {
        if !header.iter().any(|name| name == required) {
            return Err(DataError::MissingColumn {
                column: required.to_string(),
            });
        }
    }
    Ok(())
}

/// Dtype overrides applied when reading the ledger.
pub(crate) fn input_overrides() -> Schema {
    Schema::from_iter([
        Field::new("invoice_id".into(), DataType::String),
        Field::new("customer_id".into(), DataType::String),
        Field::new("salesperson_id".into(), DataType::String),
        Field::new("region".into(), DataType::String),
        Field::new("payment_method".into(), DataType::String),
        Field::new("invoice_date".into(), DataType::String),
        Field::new("due_date".into(), DataType::String),
        Field::new("payment_date".into(), DataType::String),
        Field::new("amount_billed".into(), DataType::Float64),
        Field::new("discount".into(), DataType::Float64),
        Field::new("amount_received".into(), DataType::Float64),
        Field::new("is_duplicate".into(), DataType::Int64),
        Field::new("is_leaked".into(), DataType::Int64),
        Field::new("leakage_type".into(), DataType::String),
    ])
}
