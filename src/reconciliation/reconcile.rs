//! Joins a period's budgets against its spending.

use std::collections::HashMap;

use serde::Serialize;
use time::UtcOffset;

use crate::{
    Error,
    budget::{Budget, BudgetId},
    category::Category,
    period::Period,
    reconciliation::{
        BudgetStatus, aggregate_expenses,
        status::{from_cents, to_cents},
    },
    stores::{BudgetQuery, BudgetStore, TransactionQuery, TransactionStore},
};

/// Actual spending compared with the budgeted limit for one category in one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReconciliation {
    /// The ID of the budget being reconciled.
    pub budget_id: BudgetId,
    /// The category of the budget.
    pub category: Category,
    /// The month of the budget.
    pub period: Period,
    /// The spending limit.
    pub budgeted: f64,
    /// The total expenses in the category for the period.
    pub actual: f64,
    /// How much can still be spent, never negative.
    pub remaining: f64,
    /// How much the limit has been exceeded by, never negative.
    pub over_budget: f64,
    /// `actual` as a rounded percentage of `budgeted`, or zero for a zero budget.
    pub percent_used: i64,
    /// The status band for the spending.
    pub status: BudgetStatus,
}

impl BudgetReconciliation {
    /// Reconcile `actual` spending against `budget`.
    ///
    /// Amounts are settled in whole cents, so the derived fields never carry
    /// floating point noise from summing many expenses.
    pub fn new(budget: &Budget, actual: f64) -> Self {
        let budgeted_cents = to_cents(budget.amount);
        let actual_cents = to_cents(actual);

        Self {
            budget_id: budget.id,
            category: budget.category,
            period: budget.month,
            budgeted: budget.amount,
            actual: from_cents(actual_cents),
            remaining: from_cents((budgeted_cents - actual_cents).max(0)),
            over_budget: from_cents((actual_cents - budgeted_cents).max(0)),
            percent_used: percent_used(actual_cents, budgeted_cents),
            status: BudgetStatus::classify(actual, budget.amount),
        }
    }
}

/// The rounded percentage of `budgeted_cents` that has been spent.
///
/// Zero budgets report zero percent rather than dividing by zero.
fn percent_used(actual_cents: i64, budgeted_cents: i64) -> i64 {
    if budgeted_cents <= 0 {
        return 0;
    }

    (actual_cents as f64 / budgeted_cents as f64 * 100.0).round() as i64
}

/// Reconcile each budget for `period` against the expenses in `totals`.
///
/// Budgets for other periods are skipped. Categories without expenses
/// reconcile with zero actual spending.
///
/// # Returns
/// One reconciliation per budget for `period`, in the same order as `budgets`.
pub fn reconcile(
    totals: &HashMap<Category, f64>,
    budgets: &[Budget],
    period: Period,
) -> Vec<BudgetReconciliation> {
    budgets
        .iter()
        .filter(|budget| budget.month == period)
        .map(|budget| {
            let actual = totals.get(&budget.category).copied().unwrap_or(0.0);

            BudgetReconciliation::new(budget, actual)
        })
        .collect()
}

/// Load the budgets and expenses for `period` from the stores and reconcile them.
///
/// # Errors
/// Returns an error if either store fails.
pub fn reconcile_period(
    transaction_store: &impl TransactionStore,
    budget_store: &impl BudgetStore,
    period: Period,
    local_offset: UtcOffset,
) -> Result<Vec<BudgetReconciliation>, Error> {
    let budgets = budget_store.list(&BudgetQuery {
        month: Some(period),
        category: None,
    })?;
    let transactions = transaction_store.list(&TransactionQuery::in_period(period, local_offset))?;

    let totals = aggregate_expenses(&transactions, period, local_offset);

    Ok(reconcile(&totals, &budgets, period))
}
