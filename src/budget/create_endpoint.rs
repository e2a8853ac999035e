//! Defines the endpoint for creating a new budget.

use axum::{Form, Json, extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use crate::{
    Error,
    budget::{Budget, BudgetForm, BudgetStoreState},
    endpoints,
    extract::ApiJson,
    htmx,
    stores::BudgetStore,
};

/// The response body for endpoints that return a single budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// The budget that was created, fetched or updated.
    pub budget: Budget,
}

/// A route handler for creating a new budget, responds with the created budget.
pub async fn create_budget_endpoint(
    State(state): State<BudgetStoreState>,
    ApiJson(form): ApiJson<BudgetForm>,
) -> Result<(StatusCode, Json<BudgetResponse>), Error> {
    let budget = state.budget_store.create(&form)?;
    tracing::debug!("created budget {} for {} in {}", budget.id, budget.category, budget.month);

    Ok((StatusCode::CREATED, Json(BudgetResponse { budget })))
}

/// A route handler for the new budget form.
///
/// Redirects to the budgets page for the budget's month, or responds with an
/// alert if the form is invalid or the month already has a budget for the category.
pub async fn create_budget_form_endpoint(
    State(state): State<BudgetStoreState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    match state.budget_store.create(&form) {
        Ok(budget) => {
            tracing::debug!(
                "created budget {} for {} in {}",
                budget.id,
                budget.category,
                budget.month
            );
            htmx::redirect(endpoints::with_month(endpoints::BUDGETS_VIEW, budget.month))
        }
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::State,
        http::{HeaderValue, StatusCode},
    };
    use serde_json::{Value, json};

    use crate::{
        budget::{BudgetForm, BudgetStoreState, create_budget_form_endpoint},
        endpoints,
        htmx::HX_REDIRECT,
        stores::{BudgetQuery, BudgetStore},
        test_utils::{get_test_app_state, get_test_server},
    };

    fn groceries_form() -> BudgetForm {
        BudgetForm {
            category: Some("Food & Dining".to_owned()),
            amount: Some(300.0),
            month: Some("2024-05".to_owned()),
            notes: Some(String::new()),
        }
    }

    #[tokio::test]
    async fn creates_budget() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::BUDGETS_API)
            .json(&json!({
                "category": "Food & Dining",
                "amount": 120,
                "month": "2024-03",
                "notes": "  Eat out less  ",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let budget = &response.json::<Value>()["budget"];
        assert_eq!(budget["category"], "Food & Dining");
        assert_eq!(budget["amount"], 120.0);
        assert_eq!(budget["month"], "2024-03");
        assert_eq!(budget["notes"], "Eat out less");
        assert!(budget["id"].as_i64().is_some());
    }

    #[tokio::test]
    async fn duplicate_budget_is_conflict_and_not_stored() {
        let state = get_test_app_state();
        let server = get_test_server(state.clone());
        let body = json!({"category": "Housing", "amount": 900, "month": "2024-03"});
        server
            .post(endpoints::BUDGETS_API)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post(endpoints::BUDGETS_API).json(&body).await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "A budget for this category and month already exists"})
        );
        assert_eq!(
            state.budget_store.list(&BudgetQuery::default()).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::BUDGETS_API)
            .json(&json!({"category": "Housing", "amount": 900}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Category, amount, and month are required fields"
        );
    }

    #[tokio::test]
    async fn invalid_fields_are_listed() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::BUDGETS_API)
            .json(&json!({"category": "Snacks", "amount": -1, "month": "March"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn form_redirects_to_budget_month() {
        let state = BudgetStoreState {
            budget_store: get_test_app_state().budget_store,
        };

        let response =
            create_budget_form_endpoint(State(state.clone()), Form(groceries_form())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_static("/budgets?month=2024-05"))
        );
        let budgets = state.budget_store.list(&BudgetQuery::default()).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].notes, None);
    }

    #[tokio::test]
    async fn duplicate_form_responds_with_alert() {
        let state = BudgetStoreState {
            budget_store: get_test_app_state().budget_store,
        };
        state.budget_store.create(&groceries_form()).unwrap();

        let response =
            create_budget_form_endpoint(State(state.clone()), Form(groceries_form())).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(response.headers().get(HX_REDIRECT).is_none());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("already exists"));
        assert_eq!(state.budget_store.list(&BudgetQuery::default()).unwrap().len(), 1);
    }
}
