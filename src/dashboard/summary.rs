//! Summary statistics for the dashboard.
//!
//! Everything here is a pure function over a snapshot of transactions, so the
//! same numbers back both the dashboard page and the summary API.

use std::collections::HashMap;

use serde::Serialize;
use time::UtcOffset;

use crate::{category::Category, period::Period, transaction::Transaction};

/// The number of months shown in the monthly expenses chart.
pub const MONTHLY_EXPENSES_PERIODS: usize = 6;

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The category the expenses were filed under.
    pub category: Category,
    /// The summed expense amount.
    pub amount: f64,
}

/// The total spent in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// The month the expenses fell in.
    pub month: Period,
    /// The summed expense amount, zero for months without expenses.
    pub amount: f64,
}

/// An overview of all recorded transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// The sum of all expenses.
    pub total_expenses: f64,
    /// The sum of all income.
    pub total_income: f64,
    /// Income minus expenses, negative when running a deficit.
    pub net_balance: f64,
    /// How many transactions are expenses.
    pub expense_count: usize,
    /// How many transactions are income.
    pub income_count: usize,
    /// The category with the most spending, if anything has been spent.
    pub top_expense_category: Option<CategoryTotal>,
    /// Spending per category, largest first.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// The latest transaction by date.
    pub most_recent_transaction: Option<Transaction>,
    /// Spending per month for the months up to and including the current one, oldest first.
    pub monthly_expenses: Vec<MonthlyTotal>,
}

impl DashboardSummary {
    /// Summarise `transactions` as of the period `current`.
    pub fn new(transactions: &[Transaction], current: Period, local_offset: UtcOffset) -> Self {
        let total_expenses = total_expenses(transactions);
        let total_income = total_income(transactions);
        let expenses_by_category = expenses_by_category(transactions);

        Self {
            total_expenses,
            total_income,
            net_balance: net_balance(total_income, total_expenses),
            expense_count: transactions.iter().filter(|t| t.is_expense).count(),
            income_count: transactions.iter().filter(|t| !t.is_expense).count(),
            top_expense_category: top_expense_category(transactions),
            expenses_by_category,
            most_recent_transaction: most_recent_transaction(transactions).cloned(),
            monthly_expenses: monthly_expenses(
                transactions,
                current,
                local_offset,
                MONTHLY_EXPENSES_PERIODS,
            ),
        }
    }
}

/// The sum of every expense.
pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.is_expense)
        .map(|transaction| transaction.amount)
        .sum()
}

/// The sum of every income transaction.
pub fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|transaction| !transaction.is_expense)
        .map(|transaction| transaction.amount)
        .sum()
}

/// Income minus expenses.
pub fn net_balance(total_income: f64, total_expenses: f64) -> f64 {
    total_income - total_expenses
}

/// Sums all expenses by category.
///
/// # Returns
/// One entry per category with expenses, sorted by amount descending. Ties
/// are broken by the category's position in [Category::ALL].
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense) {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    let mut totals: Vec<_> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    totals.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    totals
}

/// The category with the largest expense total, `None` if there are no expenses.
pub fn top_expense_category(transactions: &[Transaction]) -> Option<CategoryTotal> {
    expenses_by_category(transactions).into_iter().next()
}

/// The latest transaction by date, ties going to the most recently created.
pub fn most_recent_transaction(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .max_by_key(|transaction| (transaction.date, transaction.id))
}

/// Sums the expenses of each of the `count` periods ending at `current`.
///
/// # Returns
/// The periods oldest first. Periods without expenses have a total of zero
/// and income is never counted.
pub fn monthly_expenses(
    transactions: &[Transaction],
    current: Period,
    local_offset: UtcOffset,
    count: usize,
) -> Vec<MonthlyTotal> {
    let mut totals: Vec<MonthlyTotal> = current
        .last_n(count)
        .into_iter()
        .map(|month| MonthlyTotal { month, amount: 0.0 })
        .collect();

    for transaction in transactions.iter().filter(|t| t.is_expense) {
        let month = Period::from_timestamp(transaction.date, local_offset);

        if let Some(total) = totals.iter_mut().find(|total| total.month == month) {
            total.amount += transaction.amount;
        }
    }

    totals
}
