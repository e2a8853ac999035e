//! Defines the endpoint for fetching a single transaction.

use axum::{
    Json,
    extract::{FromRef, Path, State},
};

use crate::{
    AppState, Error,
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::{Transaction, parse_transaction_id},
};

/// The state needed to get or delete a transaction.
#[derive(Debug, Clone)]
pub struct TransactionStoreState {
    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,
}

impl FromRef<AppState> for TransactionStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler that responds with the transaction with the ID in the path.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionStoreState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, Error> {
    let transaction_id = parse_transaction_id(&transaction_id)?;

    state.transaction_store.get(transaction_id).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{get_test_app_state, get_test_server},
    };

    #[tokio::test]
    async fn gets_transaction() {
        let server = get_test_server(get_test_app_state());
        let created: Value = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"amount": 3, "description": "Tea"}))
            .await
            .json();
        let id = created["id"].as_i64().unwrap();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION_API, id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), created);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION_API, 999))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Transaction not found");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/api/transactions/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Invalid transaction ID format"
        );
    }
}
