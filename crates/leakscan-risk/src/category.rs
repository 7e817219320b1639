//! Risk category labels and binning.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordinal risk bucket derived from the normalized score.
///
/// A closed enumeration so downstream filters can never meet an unexpected
/// label. Bins over the normalized score are left-exclusive/right-inclusive,
/// except that a score of exactly 0 folds into `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Score in [0, 25].
    Low,
    /// Score in (25, 50].
    Medium,
    /// Score in (50, 75].
    High,
    /// Score in (75, 100].
    Critical,
}

impl RiskCategory {
    /// Every category, in ascending severity.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// The exact label written to the output artifact.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Bin a normalized score into its category.
    pub fn from_score(score: f64) -> Self {
        if score <= 25.0 {
            Self::Low
        } else if score <= 50.0 {
            Self::Medium
        } else if score <= 75.0 {
            Self::High
        } else {
            Self::Critical
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four category labels.
#[derive(Debug, Error)]
#[error("unknown risk category label: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for RiskCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Critical" => Ok(Self::Critical),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Columnar counterpart of [`RiskCategory::from_score`].
pub fn risk_category_expr(score_column: &str) -> Expr {
    when(col(score_column).lt_eq(lit(25.0)))
        .then(lit(RiskCategory::Low.as_str()))
        .when(col(score_column).lt_eq(lit(50.0)))
        .then(lit(RiskCategory::Medium.as_str()))
        .when(col(score_column).lt_eq(lit(75.0)))
        .then(lit(RiskCategory::High.as_str()))
        .otherwise(lit(RiskCategory::Critical.as_str()))
}
