//! Defines the endpoint for updating a transaction.

use axum::{
    Form, Json,
    extract::{Path, State},
    response::Response,
};

use crate::{
    Error, endpoints,
    extract::ApiJson,
    htmx,
    period::Period,
    stores::TransactionStore,
    timezone::local_offset,
    transaction::{Transaction, TransactionForm, WriteTransactionState, parse_transaction_id},
};

/// A route handler for updating a transaction.
///
/// Only the fields present in the body are changed.
pub async fn edit_transaction_endpoint(
    State(state): State<WriteTransactionState>,
    Path(transaction_id): Path<String>,
    ApiJson(form): ApiJson<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    let transaction_id = parse_transaction_id(&transaction_id)?;
    let local_offset = local_offset(&state.local_timezone)?;

    let transaction = state
        .transaction_store
        .update(transaction_id, &form, local_offset)?;
    tracing::debug!("updated transaction {transaction_id}");

    Ok(Json(transaction))
}

/// A route handler for the edit transaction form.
///
/// Redirects to the transactions page for the month the transaction falls
/// in, or responds with an alert if the form is invalid.
pub async fn edit_transaction_form_endpoint(
    State(state): State<WriteTransactionState>,
    Path(transaction_id): Path<String>,
    Form(form): Form<TransactionForm>,
) -> Response {
    match update_from_form(&state, &transaction_id, form) {
        Ok(month) => htmx::redirect(endpoints::with_month(endpoints::TRANSACTIONS_VIEW, month)),
        Err(error) => error.into_alert_response(),
    }
}

fn update_from_form(
    state: &WriteTransactionState,
    transaction_id: &str,
    mut form: TransactionForm,
) -> Result<Period, Error> {
    let transaction_id = parse_transaction_id(transaction_id)?;
    let local_offset = local_offset(&state.local_timezone)?;
    let existing = state.transaction_store.get(transaction_id)?;

    // The date input only holds the day, an unchanged day keeps the stored time.
    let existing_day = existing.date.to_offset(local_offset).date().to_string();
    if form.date.as_deref() == Some(existing_day.as_str()) {
        form.date = None;
    }

    let transaction = state
        .transaction_store
        .update(transaction_id, &form, local_offset)?;
    tracing::debug!("updated transaction {transaction_id}");

    Ok(Period::from_timestamp(transaction.date, local_offset))
}
