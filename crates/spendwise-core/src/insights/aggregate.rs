//! Aggregator - expense totals per category inside a date window

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Transaction;

use super::types::{DateWindow, SpendByCategory};

/// Sum expense amounts per category for dates in `[window_start, window_end_exclusive)`
///
/// Income never counts against a budget. An inverted window matches nothing.
/// A transaction that would push a category total past the `Decimal` range
/// is left out of that total.
pub fn aggregate(
    transactions: &[Transaction],
    window_start: NaiveDate,
    window_end_exclusive: NaiveDate,
) -> SpendByCategory {
    aggregate_window(
        transactions,
        DateWindow::new(window_start, window_end_exclusive),
    )
}

/// Same as [`aggregate`], taking a prebuilt window
pub fn aggregate_window(transactions: &[Transaction], window: DateWindow) -> SpendByCategory {
    let mut spent = SpendByCategory::new();

    if window.is_empty() {
        tracing::debug!(%window, "Empty aggregation window");
        return spent;
    }

    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && window.contains(tx.date))
    {
        let total = spent.entry(tx.category).or_insert(Decimal::ZERO);
        match total.checked_add(tx.amount) {
            Some(sum) => *total = sum,
            None => tracing::warn!(
                id = %tx.id,
                category = tx.category.as_str(),
                "Skipping transaction that would overflow the category total"
            ),
        }
    }

    spent
}
