//! Budgets: monthly spending limits per category.
//!
//! This module contains the `Budget` model with its validation and table
//! schema, the JSON API endpoints, and the pages for listing, setting and
//! editing budgets.

mod budgets_page;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod get_endpoint;
mod list_endpoint;

pub use budgets_page::get_budgets_page;
pub(crate) use core::BUDGET_COLUMNS;
pub use core::{
    Budget, BudgetForm, BudgetId, NewBudget, create_budget_table, map_budget_row, parse_budget_id,
};
pub use create_endpoint::{BudgetResponse, create_budget_endpoint, create_budget_form_endpoint};
pub use create_page::{CreateBudgetPageState, NewBudgetQuery, get_create_budget_page};
pub use delete_endpoint::{delete_budget_endpoint, delete_budget_row_endpoint};
pub use edit_endpoint::{edit_budget_endpoint, edit_budget_form_endpoint};
pub use edit_page::get_edit_budget_page;
pub use get_endpoint::get_budget_endpoint;
pub use list_endpoint::{BudgetFilters, BudgetStoreState, BudgetsResponse, list_budgets_endpoint};
