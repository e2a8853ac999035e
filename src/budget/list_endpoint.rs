//! Defines the endpoint for listing budgets.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    budget::Budget,
    period::Period,
    stores::{BudgetQuery, BudgetStore, SQLiteBudgetStore},
    transaction::parse_category_filter,
};

/// The state needed by the budget API endpoints.
#[derive(Debug, Clone)]
pub struct BudgetStoreState {
    /// The store for managing budgets.
    pub budget_store: SQLiteBudgetStore,
}

impl FromRef<AppState> for BudgetStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
        }
    }
}

/// The optional filters for listing budgets.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetFilters {
    /// Only list budgets for this month (YYYY-MM).
    pub month: Option<String>,
    /// Only list budgets in this category.
    pub category: Option<String>,
}

impl BudgetFilters {
    /// Convert the filters into a store query, treating empty values as missing.
    pub fn to_query(&self) -> Result<BudgetQuery, Error> {
        let month = self
            .month
            .as_deref()
            .map(str::trim)
            .filter(|month| !month.is_empty())
            .map(str::parse::<Period>)
            .transpose()?;
        let category = parse_category_filter(self.category.as_deref())?;

        Ok(BudgetQuery { month, category })
    }
}

/// The response body listing budgets.
#[derive(Debug, Serialize)]
pub struct BudgetsResponse {
    /// The matching budgets, ordered by category.
    pub budgets: Vec<Budget>,
}

/// A route handler for listing budgets.
pub async fn list_budgets_endpoint(
    State(state): State<BudgetStoreState>,
    Query(filters): Query<BudgetFilters>,
) -> Result<Json<BudgetsResponse>, Error> {
    let query = filters.to_query()?;
    let budgets = state.budget_store.list(&query)?;

    Ok(Json(BudgetsResponse { budgets }))
}
