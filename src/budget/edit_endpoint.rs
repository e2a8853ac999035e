//! Defines the endpoint for updating a budget.

use axum::{
    Form, Json,
    extract::{Path, State},
    response::Response,
};

use crate::{
    Error,
    budget::{BudgetForm, BudgetResponse, BudgetStoreState, parse_budget_id},
    endpoints,
    extract::ApiJson,
    htmx,
    stores::BudgetStore,
};

/// A route handler for replacing the fields of a budget.
pub async fn edit_budget_endpoint(
    State(state): State<BudgetStoreState>,
    Path(budget_id): Path<String>,
    ApiJson(form): ApiJson<BudgetForm>,
) -> Result<Json<BudgetResponse>, Error> {
    let budget_id = parse_budget_id(&budget_id)?;

    let budget = state.budget_store.update(budget_id, &form)?;
    tracing::debug!("updated budget {budget_id}");

    Ok(Json(BudgetResponse { budget }))
}

/// A route handler for the edit budget form.
///
/// Redirects to the budgets page for the budget's month, or responds with an
/// alert if the changes were rejected.
pub async fn edit_budget_form_endpoint(
    State(state): State<BudgetStoreState>,
    Path(budget_id): Path<String>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let result = parse_budget_id(&budget_id)
        .and_then(|budget_id| state.budget_store.update(budget_id, &form));

    match result {
        Ok(budget) => {
            tracing::debug!("updated budget {}", budget.id);
            htmx::redirect(endpoints::with_month(endpoints::BUDGETS_VIEW, budget.month))
        }
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::{Path, State},
        http::{HeaderValue, StatusCode},
    };
    use serde_json::{Value, json};

    use crate::{
        budget::{BudgetForm, BudgetStoreState, edit_budget_form_endpoint},
        endpoints::{self, format_endpoint},
        htmx::HX_REDIRECT,
        stores::BudgetStore,
        test_utils::{get_test_app_state, get_test_server},
    };

    async fn create_budget(server: &axum_test::TestServer, category: &str, month: &str) -> i64 {
        let created: Value = server
            .post(endpoints::BUDGETS_API)
            .json(&json!({"category": category, "amount": 100, "month": month}))
            .await
            .json();

        created["budget"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn updates_budget() {
        let server = get_test_server(get_test_app_state());
        let id = create_budget(&server, "Shopping", "2024-03").await;

        let response = server
            .put(&format_endpoint(endpoints::BUDGET_API, id))
            .json(&json!({"category": "Shopping", "amount": 250.5, "month": "2024-03", "notes": "Sale"}))
            .await;

        response.assert_status_ok();
        let budget = &response.json::<Value>()["budget"];
        assert_eq!(budget["id"], id);
        assert_eq!(budget["amount"], 250.5);
        assert_eq!(budget["notes"], "Sale");
    }

    #[tokio::test]
    async fn update_without_notes_keeps_them() {
        let server = get_test_server(get_test_app_state());
        let created: Value = server
            .post(endpoints::BUDGETS_API)
            .json(&json!({"category": "Travel", "amount": 400, "month": "2024-03", "notes": "Trip"}))
            .await
            .json();
        let id = created["budget"]["id"].as_i64().unwrap();

        let response = server
            .put(&format_endpoint(endpoints::BUDGET_API, id))
            .json(&json!({"category": "Travel", "amount": 450, "month": "2024-03"}))
            .await;

        response.assert_status_ok();
        let budget = &response.json::<Value>()["budget"];
        assert_eq!(budget["amount"], 450.0);
        assert_eq!(budget["notes"], "Trip");
    }

    #[tokio::test]
    async fn blank_notes_clear_them() {
        let server = get_test_server(get_test_app_state());
        let created: Value = server
            .post(endpoints::BUDGETS_API)
            .json(&json!({"category": "Travel", "amount": 400, "month": "2024-03", "notes": "Trip"}))
            .await
            .json();
        let id = created["budget"]["id"].as_i64().unwrap();

        let response = server
            .put(&format_endpoint(endpoints::BUDGET_API, id))
            .json(&json!({"category": "Travel", "amount": 400, "month": "2024-03", "notes": "  "}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["budget"]["notes"], Value::Null);
    }

    #[tokio::test]
    async fn moving_onto_existing_pair_is_conflict() {
        let server = get_test_server(get_test_app_state());
        create_budget(&server, "Shopping", "2024-03").await;
        let id = create_budget(&server, "Shopping", "2024-04").await;

        let response = server
            .put(&format_endpoint(endpoints::BUDGET_API, id))
            .json(&json!({"category": "Shopping", "amount": 100, "month": "2024-03"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn missing_budget_is_not_found() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .put(&format_endpoint(endpoints::BUDGET_API, 5))
            .json(&json!({"category": "Shopping", "amount": 100, "month": "2024-03"}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn form_update_redirects_to_new_month() {
        let state = BudgetStoreState {
            budget_store: get_test_app_state().budget_store,
        };
        let budget = state
            .budget_store
            .create(&BudgetForm {
                category: Some("Utilities".to_owned()),
                amount: Some(150.0),
                month: Some("2024-03".to_owned()),
                notes: Some("Power".to_owned()),
            })
            .unwrap();
        let form = BudgetForm {
            category: Some("Utilities".to_owned()),
            amount: Some(175.0),
            month: Some("2024-04".to_owned()),
            notes: Some("Power and water".to_owned()),
        };

        let response = edit_budget_form_endpoint(
            State(state.clone()),
            Path(budget.id.to_string()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_static("/budgets?month=2024-04"))
        );
        let updated = state.budget_store.get(budget.id).unwrap();
        assert_eq!(updated.amount, 175.0);
        assert_eq!(updated.notes.as_deref(), Some("Power and water"));
    }

    #[tokio::test]
    async fn invalid_form_update_responds_with_alert() {
        let state = BudgetStoreState {
            budget_store: get_test_app_state().budget_store,
        };
        let form = BudgetForm {
            category: Some("Utilities".to_owned()),
            amount: Some(-1.0),
            month: Some("2024-04".to_owned()),
            notes: None,
        };

        let response =
            edit_budget_form_endpoint(State(state), Path("abc".to_owned()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Invalid budget ID format"));
    }
}
