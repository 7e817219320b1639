//! Payment status labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of payment status labels carried on every enriched record.
///
/// Downstream filtering keys on these exact strings, so the set is modeled as
/// a tagged enum rather than free-form text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payment received in full and on time.
    #[serde(rename = "Paid in Full")]
    PaidInFull,

    /// Payment received but short of the expected amount.
    #[serde(rename = "Underpaid")]
    Underpaid,

    /// No payment recorded as of the data snapshot.
    #[serde(rename = "Missing")]
    Missing,

    /// Payment recorded after the due date.
    #[serde(rename = "Late")]
    Late,
}

impl PaymentStatus {
    /// Every status label, in assignment-precedence order (lowest first).
    pub const ALL: [Self; 4] = [Self::PaidInFull, Self::Underpaid, Self::Missing, Self::Late];

    /// The exact label written to the output artifact.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaidInFull => "Paid in Full",
            Self::Underpaid => "Underpaid",
            Self::Missing => "Missing",
            Self::Late => "Late",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four status labels.
#[derive(Debug, Error)]
#[error("unknown payment status label: {0}")]
pub struct ParseStatusError(String);

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid in Full" => Ok(Self::PaidInFull),
            "Underpaid" => Ok(Self::Underpaid),
            "Missing" => Ok(Self::Missing),
            "Late" => Ok(Self::Late),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
