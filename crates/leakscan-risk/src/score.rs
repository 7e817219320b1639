//! Penalty components and batch-relative score normalization.

use polars::prelude::*;

use crate::category::risk_category_expr;
use crate::error::Result;

/// Divisor turning delay days into penalty points.
pub const DELAY_DIVISOR: f64 = 3.0;
/// Ceiling on the delay penalty.
pub const DELAY_CAP: f64 = 30.0;
/// Flat penalty for an invoice with no recorded payment.
pub const MISSING_PAYMENT_PENALTY: f64 = 50.0;
/// Ceiling on the underpayment penalty.
pub const UNDERPAYMENT_CAP: f64 = 40.0;
/// Discount percentage above which the excess-discount penalty kicks in.
pub const DISCOUNT_THRESHOLD_PCT: f64 = 15.0;
/// Ceiling on the excess-discount penalty.
pub const DISCOUNT_CAP: f64 = 20.0;
/// Flat penalty for an invoice flagged as a duplicate.
pub const DUPLICATE_PENALTY: f64 = 25.0;

/// Working column holding the pre-normalization score.
const RAW_SCORE: &str = "raw_risk_score";

/// Clamp a penalty expression to its ceiling.
fn capped(penalty: Expr, cap: f64) -> Expr {
    when(penalty.clone().gt(lit(cap)))
        .then(lit(cap))
        .otherwise(penalty)
}

/// Delay penalty: `min(payment_delay_days / 3, 30)` for positive delays.
fn delay_penalty_expr() -> Expr {
    when(col("payment_delay_days").gt(lit(0)))
        .then(capped(
            col("payment_delay_days").cast(DataType::Float64) / lit(DELAY_DIVISOR),
            DELAY_CAP,
        ))
        .otherwise(lit(0.0))
        .fill_null(lit(0.0))
}

/// Flat penalty for missing payments.
fn missing_payment_penalty_expr() -> Expr {
    when(col("payment_date").is_null())
        .then(lit(MISSING_PAYMENT_PENALTY))
        .otherwise(lit(0.0))
}

/// Underpayment penalty: `min(payment_gap / expected_payment * 100, 40)` for
/// positive gaps. An expected payment of 0 yields a defined 0 instead of a
/// division fault.
fn underpayment_penalty_expr() -> Expr {
    when(
        col("payment_gap")
            .gt(lit(0.0))
            .and(col("expected_payment").neq(lit(0.0))),
    )
    .then(capped(
        col("payment_gap") / col("expected_payment") * lit(100.0),
        UNDERPAYMENT_CAP,
    ))
    .otherwise(lit(0.0))
    .fill_null(lit(0.0))
}

/// Excess-discount penalty: `min(discount_percentage - 15, 20)` above the
/// threshold.
fn excess_discount_penalty_expr() -> Expr {
    when(col("discount_percentage").gt(lit(DISCOUNT_THRESHOLD_PCT)))
        .then(capped(
            col("discount_percentage") - lit(DISCOUNT_THRESHOLD_PCT),
            DISCOUNT_CAP,
        ))
        .otherwise(lit(0.0))
        .fill_null(lit(0.0))
}

/// Flat penalty for duplicate invoices.
fn duplicate_penalty_expr() -> Expr {
    when(col("is_duplicate").eq(lit(1)))
        .then(lit(DUPLICATE_PENALTY))
        .otherwise(lit(0.0))
        .fill_null(lit(0.0))
}

/// Sum of all penalty components, before normalization.
///
/// Each component clamps independently, so the conceptual raw range is
/// 0 to 165. Null inputs contribute nothing to the sum.
pub fn raw_score_expr() -> Expr {
    delay_penalty_expr()
        + missing_payment_penalty_expr()
        + underpayment_penalty_expr()
        + excess_discount_penalty_expr()
        + duplicate_penalty_expr()
}

/// Score every record in the batch and attach its risk category.
///
/// An explicit two-pass algorithm: the raw scores are materialized first,
/// because the batch-wide maximum must be known before any individual score
/// can be finalized. Every raw score is then rescaled by `100 / max` and
/// rounded to one decimal, so the riskiest record in the batch always lands
/// on 100. When the whole batch is clean (max of 0) the rescale is skipped
/// and every score stays 0. The resulting `risk_score` is batch-relative by
/// design: the same record can score differently in a different batch.
pub fn score_batch(derived: LazyFrame) -> Result<DataFrame> {
    let raw = derived
        .with_columns([raw_score_expr().alias(RAW_SCORE)])
        .collect()?;

    let max_raw = raw.column(RAW_SCORE)?.f64()?.max().unwrap_or(0.0);
    log::debug!("batch maximum raw risk score: {max_raw}");

    let normalized = if max_raw > 0.0 {
        (col(RAW_SCORE) * lit(100.0) / lit(max_raw)).round(1)
    } else {
        col(RAW_SCORE).round(1)
    };

    let scored = raw
        .lazy()
        .with_columns([normalized.alias("risk_score")])
        .with_columns([risk_category_expr("risk_score").alias("risk_category")])
        .collect()?
        .drop(RAW_SCORE)?;

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Frame with the derived columns the scorer reads. `payment_date` is
    /// only inspected for nullness here, so a nullable int stands in for it.
    fn derived_frame(
        delay: &[Option<i32>],
        paid: &[Option<i32>],
        gap: &[f64],
        expected: &[f64],
        discount_pct: &[f64],
        duplicate: &[i64],
    ) -> DataFrame {
        DataFrame::new(vec![
            Column::new("payment_delay_days".into(), delay),
            Column::new("payment_date".into(), paid),
            Column::new("payment_gap".into(), gap),
            Column::new("expected_payment".into(), expected),
            Column::new("discount_percentage".into(), discount_pct),
            Column::new("is_duplicate".into(), duplicate),
        ])
        .unwrap()
    }

    fn raw_scores(df: DataFrame) -> Vec<f64> {
        let out = df
            .lazy()
            .with_columns([raw_score_expr().alias("raw")])
            .collect()
            .unwrap();
        let raw = out.column("raw").unwrap();
        raw.f64().unwrap().into_iter().map(|v| v.unwrap()).collect()
    }

    #[test]
    fn test_worked_example_raw_score() {
        // amount_billed=1000, discount=200, amount_received=700, paid 10 days
        // late: delay 10/3 = 3.33, underpay 100/800*100 = 12.5, discount
        // 20 - 15 = 5, raw 20.83.
        let df = derived_frame(
            &[Some(10)],
            &[Some(1)],
            &[100.0],
            &[800.0],
            &[20.0],
            &[0],
        );
        let raw = raw_scores(df);
        assert_relative_eq!(raw[0], 20.833333, epsilon = 1e-4);
    }

    #[test]
    fn test_unpaid_row_gets_flat_missing_penalty() {
        // Unpaid and fully short: 50 + capped underpay 40.
        let df = derived_frame(&[None], &[None], &[800.0], &[800.0], &[0.0], &[0]);
        let raw = raw_scores(df);
        assert_relative_eq!(raw[0], 90.0);
    }

    #[test]
    fn test_component_caps() {
        // 300 days late caps at 30; gap of 10x expected caps at 40; 80%
        // discount caps at 20; duplicate adds flat 25.
        let df = derived_frame(
            &[Some(300)],
            &[Some(1)],
            &[8000.0],
            &[800.0],
            &[80.0],
            &[1],
        );
        let raw = raw_scores(df);
        assert_relative_eq!(raw[0], 30.0 + 40.0 + 20.0 + 25.0);
    }

    #[test]
    fn test_zero_expected_payment_is_guarded() {
        let df = derived_frame(&[Some(0)], &[Some(1)], &[100.0], &[0.0], &[0.0], &[0]);
        let raw = raw_scores(df);
        assert_relative_eq!(raw[0], 0.0);
    }

    #[test]
    fn test_negative_delay_and_gap_score_zero() {
        let df = derived_frame(&[Some(-5)], &[Some(1)], &[-50.0], &[800.0], &[10.0], &[0]);
        let raw = raw_scores(df);
        assert_relative_eq!(raw[0], 0.0);
    }

    #[test]
    fn test_null_delay_does_not_poison_the_sum() {
        // Null delay with a duplicate flag: only the flat 25 applies.
        let df = derived_frame(&[None], &[Some(1)], &[0.0], &[800.0], &[0.0], &[1]);
        let raw = raw_scores(df);
        assert_relative_eq!(raw[0], 25.0);
    }

    #[test]
    fn test_batch_max_normalizes_to_100() {
        let df = derived_frame(
            &[Some(10), None],
            &[Some(1), None],
            &[100.0, 800.0],
            &[800.0, 800.0],
            &[20.0, 20.0],
            &[0, 1],
        );
        let scored = score_batch(df.lazy()).unwrap();
        let scores = scored.column("risk_score").unwrap();
        let scores = scores.f64().unwrap();
        // Row 1 raw: 50 + 40 + 5 + 25 = 120 -> 100.0.
        assert_eq!(scores.get(1), Some(100.0));
        // Row 0 raw: 20.8333 -> 20.8333 * 100 / 120 = 17.36 -> 17.4.
        assert_eq!(scores.get(0), Some(17.4));
        let categories = scored.column("risk_category").unwrap();
        let categories = categories.str().unwrap();
        assert_eq!(categories.get(0), Some("Low"));
        assert_eq!(categories.get(1), Some("Critical"));
    }

    #[test]
    fn test_clean_batch_stays_zero() {
        let df = derived_frame(
            &[Some(-1), Some(0)],
            &[Some(1), Some(1)],
            &[0.0, -10.0],
            &[800.0, 500.0],
            &[10.0, 0.0],
            &[0, 0],
        );
        let scored = score_batch(df.lazy()).unwrap();
        let scores = scored.column("risk_score").unwrap();
        let scores = scores.f64().unwrap();
        assert_eq!(scores.get(0), Some(0.0));
        assert_eq!(scores.get(1), Some(0.0));
        let categories = scored.column("risk_category").unwrap();
        let categories = categories.str().unwrap();
        assert_eq!(categories.get(0), Some("Low"));
    }

    #[test]
    fn test_raw_column_is_dropped_from_output() {
        let df = derived_frame(&[Some(10)], &[Some(1)], &[0.0], &[800.0], &[0.0], &[0]);
        let scored = score_batch(df.lazy()).unwrap();
        assert!(scored.column("raw_risk_score").is_err());
        assert!(scored.column("risk_score").is_ok());
        assert!(scored.column("risk_category").is_ok());
    }
}
