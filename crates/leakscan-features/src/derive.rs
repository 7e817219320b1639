//! Derived-field expressions over the raw transaction frame.
//!
//! Everything here is a pure columnar transform: the input frame comes back
//! with the derived columns appended and no rows added or removed.

use polars::prelude::*;

use crate::status::PaymentStatus;

/// Append every derived field to the raw transaction frame.
///
/// Column order matters within the transform: `amount_received` is zeroed for
/// unpaid rows first, so `payment_gap` registers the full shortfall, and
/// `payment_status` is computed after the delay and gap columns it reads.
pub fn derive_features(transactions: LazyFrame) -> LazyFrame {
    transactions
        .with_columns([when(col("payment_date").is_null())
            .then(lit(0.0))
            .otherwise(col("amount_received"))
            .alias("amount_received")])
        .with_columns([
            // Date columns are stored as days since epoch, so the cast
            // difference is the delay in whole days. Null payment date
            // propagates to a null delay, never zero.
            (col("payment_date").cast(DataType::Int32) - col("due_date").cast(DataType::Int32))
                .alias("payment_delay_days"),
            (col("amount_billed") - col("discount")).alias("expected_payment"),
        ])
        .with_columns([
            (col("expected_payment") - col("amount_received")).alias("payment_gap"),
        ])
        .with_columns([
            payment_status_expr().alias("payment_status"),
            discount_percentage_expr().alias("discount_percentage"),
            invoice_month_expr().alias("invoice_month"),
        ])
}

/// Payment status with the documented override precedence.
///
/// The upstream assignment order is `Paid in Full` < `Underpaid` < `Missing`
/// < `Late`, each later assignment overwriting the earlier one. Expressed as
/// a first-match-wins chain, that is the same order reversed. The order is
/// load-bearing: a row carrying a positive delay together with a null payment
/// date classifies as `Late`, not `Missing`.
pub fn payment_status_expr() -> Expr {
    when(col("payment_delay_days").gt(lit(0)).fill_null(lit(false)))
        .then(lit(PaymentStatus::Late.as_str()))
        .when(col("payment_date").is_null())
        .then(lit(PaymentStatus::Missing.as_str()))
        .when(col("payment_gap").gt(lit(0.0)).fill_null(lit(false)))
        .then(lit(PaymentStatus::Underpaid.as_str()))
        .otherwise(lit(PaymentStatus::PaidInFull.as_str()))
}

/// Discount as a percentage of the billed amount, 0 when nothing was billed.
pub fn discount_percentage_expr() -> Expr {
    when(col("amount_billed").neq(lit(0.0)))
        .then(col("discount") / col("amount_billed") * lit(100.0))
        .otherwise(lit(0.0))
}

/// Lexicographically sortable `YYYY-MM` label from the invoice date.
pub fn invoice_month_expr() -> Expr {
    col("invoice_date").dt().to_string("%Y-%m")
}
