//! Dashboard module
//!
//! Provides an overview page showing financial summaries and charts, and the
//! same summary as JSON.

mod cards;
pub(crate) mod charts;
mod handlers;
mod summary;

pub use handlers::{DashboardState, get_dashboard_page, get_summary_endpoint};
pub use summary::{
    CategoryTotal, DashboardSummary, MONTHLY_EXPENSES_PERIODS, MonthlyTotal, expenses_by_category,
    monthly_expenses, most_recent_transaction, net_balance, top_expense_category, total_expenses,
    total_income,
};
