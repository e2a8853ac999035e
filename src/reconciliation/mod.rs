//! The budget reconciliation engine.
//!
//! Expenses are grouped by category for a period ([aggregate_expenses]),
//! joined against that period's budgets ([reconcile]) and each result is given
//! a [BudgetStatus].

mod aggregation;
mod endpoint;
mod reconcile;
mod status;

pub use aggregation::aggregate_expenses;
pub use endpoint::{
    ReconciliationQuery, ReconciliationResponse, ReconciliationState, get_reconciliation_endpoint,
};
pub use reconcile::{BudgetReconciliation, reconcile, reconcile_period};
pub use status::{BudgetStatus, NEAR_LIMIT_THRESHOLD};
