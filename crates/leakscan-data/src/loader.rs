//! CSV loader for the raw transaction ledger.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{DataError, Result};
use crate::schema::{self, DATE_COLUMNS};

/// Load the raw transaction ledger from a CSV file.
///
/// The header is validated against the required column set before the file is
/// parsed, so a schema problem aborts with the missing column named and no
/// rows touched. Date columns come back as `Date` with nulls where the text
/// was unparsable; a malformed numeric value fails the whole read.
pub fn load_transactions(path: &Path) -> Result<DataFrame> {
    let header = read_header(path)?;
    schema::validate_columns(&header)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(schema::input_overrides())))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    for name in DATE_COLUMNS {
        parse_date_column(&mut df, name)?;
    }

    log::debug!("loaded {} ledger rows from {}", df.height(), path.display());
    Ok(df)
}

/// Read just the header row of the ledger.
fn read_header(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| DataError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let header = reader.headers()?.iter().map(str::to_string).collect();
    Ok(header)
}

/// Replace a text column with its parsed `Date` counterpart in place.
///
/// Unparsable values become null so that malformed-date rows keep flowing
/// through the pipeline with null derived fields.
fn parse_date_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let days: Int32Chunked = df
        .column(name)?
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_iso_date))
        .collect();
    let dates = days.into_series().cast(&DataType::Date)?.with_name(name.into());
    df.with_column(dates)?;
    Ok(())
}

/// Parse an ISO `YYYY-MM-DD` prefix into days since the Unix epoch.
fn parse_iso_date(value: &str) -> Option<i32> {
    let text = value.trim();
    let text = text.get(..10).unwrap_or(text);
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some((date - NaiveDate::default()).num_days() as i32)
}
