//! Defines the endpoint for fetching a single budget.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    budget::{BudgetResponse, BudgetStoreState, parse_budget_id},
    stores::BudgetStore,
};

/// A route handler that responds with the budget with the ID in the path.
pub async fn get_budget_endpoint(
    State(state): State<BudgetStoreState>,
    Path(budget_id): Path<String>,
) -> Result<Json<BudgetResponse>, Error> {
    let budget_id = parse_budget_id(&budget_id)?;
    let budget = state.budget_store.get(budget_id)?;

    Ok(Json(BudgetResponse { budget }))
}
