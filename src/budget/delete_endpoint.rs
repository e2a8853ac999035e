//! Defines the endpoints for deleting a budget.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde_json::{Value, json};

use crate::{
    Error,
    budget::{BudgetStoreState, parse_budget_id},
    endpoints, htmx,
    period::Period,
    stores::BudgetStore,
};

/// A route handler for deleting a budget.
pub async fn delete_budget_endpoint(
    State(state): State<BudgetStoreState>,
    Path(budget_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let budget_id = parse_budget_id(&budget_id)?;

    state.budget_store.delete(budget_id)?;
    tracing::debug!("deleted budget {budget_id}");

    Ok(Json(
        json!({ "success": true, "message": "Budget deleted successfully" }),
    ))
}

/// A route handler for the delete buttons on the budgets page.
///
/// Reloads the budgets page for the deleted budget's month so the totals and
/// chart are redrawn, or responds with an alert if the budget could not be deleted.
pub async fn delete_budget_row_endpoint(
    State(state): State<BudgetStoreState>,
    Path(budget_id): Path<String>,
) -> Response {
    match delete_budget(&state, &budget_id) {
        Ok(month) => htmx::redirect(endpoints::with_month(endpoints::BUDGETS_VIEW, month)),
        Err(error) => error.into_alert_response(),
    }
}

fn delete_budget(state: &BudgetStoreState, budget_id: &str) -> Result<Period, Error> {
    let budget_id = parse_budget_id(budget_id)?;
    let budget = state.budget_store.get(budget_id)?;

    state.budget_store.delete(budget_id)?;
    tracing::debug!("deleted budget {budget_id}");

    Ok(budget.month)
}
