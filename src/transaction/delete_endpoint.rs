//! Defines the endpoints for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{TransactionStoreState, parse_transaction_id},
};

/// A route handler for deleting a transaction, responds with a confirmation message.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionStoreState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let transaction_id = parse_transaction_id(&transaction_id)?;

    state.transaction_store.delete(transaction_id)?;
    tracing::debug!("deleted transaction {transaction_id}");

    Ok(Json(
        json!({ "message": "Transaction deleted successfully" }),
    ))
}

/// A route handler for the delete buttons on the transactions page.
///
/// Responds with an empty body so htmx removes the table row, or with an alert
/// if the transaction could not be deleted.
pub async fn delete_transaction_row_endpoint(
    State(state): State<TransactionStoreState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let result = parse_transaction_id(&transaction_id)
        .and_then(|transaction_id| state.transaction_store.delete(transaction_id));

    match result {
        // htmx only swaps out the row for a 200 response.
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => error.into_alert_response(),
    }
}
