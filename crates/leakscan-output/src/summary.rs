//! Per-run leakage summary over the scored frame.

use leakscan_risk::RiskCategory;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::export::{ExportError, ExportFormat, Exporter};

/// Count of leaked records attributed to one leakage type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeakageTypeCount {
    /// Upstream leakage classification label.
    pub leakage_type: String,

    /// Number of leaked records with this label.
    pub count: u32,
}

/// Count of records falling into one risk category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCount {
    /// Risk category bucket.
    pub category: RiskCategory,

    /// Number of records in the bucket.
    pub count: u32,
}

/// End-of-run report over the scored record set.
///
/// `total_leakage_amount` is the sum of `payment_gap` across every record, so
/// overpayments offset shortfalls the same way they do in the ledger itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeakageSummary {
    /// Number of records processed.
    pub total_records: usize,

    /// Number of records flagged as leaked upstream.
    pub leaked_records: usize,

    /// Sum of the payment gap across the whole batch.
    pub total_leakage_amount: f64,

    /// Leaked record counts by leakage type, alphabetical.
    pub by_leakage_type: Vec<LeakageTypeCount>,

    /// Record counts by risk category, ascending severity.
    pub by_risk_category: Vec<CategoryCount>,
}

impl LeakageSummary {
    /// Compute the summary from the scored frame.
    pub fn from_frame(frame: &DataFrame) -> Result<Self, ExportError> {
        let is_leaked = frame.column("is_leaked")?.i64()?;
        let leakage_type = frame.column("leakage_type")?.str()?;
        let payment_gap = frame.column("payment_gap")?.f64()?;
        let risk_category = frame.column("risk_category")?.str()?;

        let leaked_records = is_leaked.into_iter().filter(|v| *v == Some(1)).count();
        let total_leakage_amount = payment_gap.sum().unwrap_or(0.0);

        let mut type_counts: BTreeMap<String, u32> = BTreeMap::new();
        for (flag, label) in is_leaked.into_iter().zip(leakage_type) {
            if flag == Some(1) {
                let label = label.unwrap_or("Unknown").to_string();
                *type_counts.entry(label).or_default() += 1;
            }
        }

        let mut category_counts: BTreeMap<&str, u32> = BTreeMap::new();
        for label in risk_category.into_iter().flatten() {
            *category_counts.entry(label).or_default() += 1;
        }

        Ok(Self {
            total_records: frame.height(),
            leaked_records,
            total_leakage_amount,
            by_leakage_type: type_counts
                .into_iter()
                .map(|(leakage_type, count)| LeakageTypeCount {
                    leakage_type,
                    count,
                })
                .collect(),
            by_risk_category: RiskCategory::ALL
                .into_iter()
                .map(|category| CategoryCount {
                    category,
                    count: category_counts.get(category.as_str()).copied().unwrap_or(0),
                })
                .collect(),
        })
    }
}

impl fmt::Display for LeakageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} records, {} with leakage, total leakage amount {:.2}",
            self.total_records, self.leaked_records, self.total_leakage_amount
        )?;
        writeln!(f, "Leakage types:")?;
        for entry in &self.by_leakage_type {
            writeln!(f, "  {}: {}", entry.leakage_type, entry.count)?;
        }
        writeln!(f, "Risk categories:")?;
        for entry in &self.by_risk_category {
            writeln!(f, "  {}: {}", entry.category, entry.count)?;
        }
        Ok(())
    }
}

/// Flattened summary line for CSV export.
#[derive(Debug, Serialize, Deserialize)]
struct SummaryRow {
    metric: String,
    value: String,
}

impl LeakageSummary {
    /// Convert to a flat structure suitable for CSV export.
    fn to_flat_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow {
                metric: "total_records".to_string(),
                value: self.total_records.to_string(),
            },
            SummaryRow {
                metric: "leaked_records".to_string(),
                value: self.leaked_records.to_string(),
            },
            SummaryRow {
                metric: "total_leakage_amount".to_string(),
                value: format!("{:.2}", self.total_leakage_amount),
            },
        ];

        for entry in &self.by_leakage_type {
            rows.push(SummaryRow {
                metric: format!("leakage_type_{}", entry.leakage_type),
                value: entry.count.to_string(),
            });
        }

        for entry in &self.by_risk_category {
            rows.push(SummaryRow {
                metric: format!("risk_category_{}", entry.category),
                value: entry.count.to_string(),
            });
        }

        rows
    }
}

impl Exporter for LeakageSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for row in self.to_flat_rows() {
                    wtr.serialize(&row)?;
                }
                let data =
                    String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?).unwrap();
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
