//! Groups a period's expenses by category.

use std::collections::HashMap;

use time::UtcOffset;

use crate::{category::Category, period::Period, transaction::Transaction};

/// Sums the expenses in `period` by category.
///
/// Income and transactions dated outside `period` (as seen from the timezone
/// `local_offset`) are ignored.
///
/// # Returns
/// HashMap mapping each category to its total spend. Categories without any
/// matching expenses are absent.
pub fn aggregate_expenses(
    transactions: &[Transaction],
    period: Period,
    local_offset: UtcOffset,
) -> HashMap<Category, f64> {
    let mut totals = HashMap::new();

    for transaction in transactions {
        if !transaction.is_expense
            || Period::from_timestamp(transaction.date, local_offset) != period
        {
            continue;
        }

        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    totals
}
