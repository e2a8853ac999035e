//! The JSON endpoint for reconciling a month's budgets.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    period::Period,
    reconciliation::{BudgetReconciliation, reconcile_period},
    stores::{SQLiteBudgetStore, SQLiteTransactionStore},
    timezone::local_offset,
};

/// The state needed to reconcile budgets.
#[derive(Debug, Clone)]
pub struct ReconciliationState {
    /// The store to read expenses from.
    pub transaction_store: SQLiteTransactionStore,
    /// The store to read budgets from.
    pub budget_store: SQLiteBudgetStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReconciliationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            budget_store: state.budget_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string for [get_reconciliation_endpoint].
#[derive(Debug, Default, Deserialize)]
pub struct ReconciliationQuery {
    /// The month to reconcile, defaults to the current month.
    pub month: Option<String>,
}

/// The response body for [get_reconciliation_endpoint].
#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    /// The month that was reconciled.
    pub month: Period,
    /// One entry per budget for the month.
    pub reconciliations: Vec<BudgetReconciliation>,
}

/// A route handler that compares each budget for a month against that month's expenses.
pub async fn get_reconciliation_endpoint(
    State(state): State<ReconciliationState>,
    Query(query): Query<ReconciliationQuery>,
) -> Result<Json<ReconciliationResponse>, Error> {
    let local_offset = local_offset(&state.local_timezone)?;
    let month = Period::parse_or_current(query.month.as_deref(), local_offset)?;

    let reconciliations = reconcile_period(
        &state.transaction_store,
        &state.budget_store,
        month,
        local_offset,
    )?;

    Ok(Json(ReconciliationResponse {
        month,
        reconciliations,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::UtcOffset;

    use crate::{
        endpoints,
        period::Period,
        test_utils::{get_test_app_state, get_test_server},
    };

    #[tokio::test]
    async fn reconciles_requested_month() {
        let state = get_test_app_state();
        let server = get_test_server(state);
        for (amount, date, is_expense) in [
            (100.0, "2024-03-05", true),
            (50.0, "2024-03-20", true),
            (30.0, "2024-03-10", false),
            (999.0, "2024-04-01", true),
        ] {
            server
                .post(endpoints::TRANSACTIONS_API)
                .json(&json!({
                    "amount": amount,
                    "date": date,
                    "description": "Groceries",
                    "category": "Food & Dining",
                    "isExpense": is_expense,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }
        server
            .post(endpoints::BUDGETS_API)
            .json(&json!({"category": "Food & Dining", "amount": 120, "month": "2024-03"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get(endpoints::RECONCILIATION_API)
            .add_query_param("month", "2024-03")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["month"], "2024-03");
        let reconciliation = &body["reconciliations"][0];
        assert_eq!(reconciliation["category"], "Food & Dining");
        assert_eq!(reconciliation["actual"], 150.0);
        assert_eq!(reconciliation["budgeted"], 120.0);
        assert_eq!(reconciliation["remaining"], 0.0);
        assert_eq!(reconciliation["overBudget"], 30.0);
        assert_eq!(reconciliation["percentUsed"], 125);
        assert_eq!(reconciliation["status"], "over");
    }

    #[tokio::test]
    async fn defaults_to_current_month() {
        let server = get_test_server(get_test_app_state());

        let response = server.get(endpoints::RECONCILIATION_API).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["month"],
            Period::current(UtcOffset::UTC).to_string().as_str()
        );
        assert_eq!(body["reconciliations"], json!([]));
    }

    #[tokio::test]
    async fn rejects_invalid_month() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .get(endpoints::RECONCILIATION_API)
            .add_query_param("month", "2024-13")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Month format must be YYYY-MM");
    }
}
