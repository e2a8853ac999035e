//! Defines the endpoint for creating a new transaction.

use axum::{
    Form, Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState, Error, endpoints,
    extract::ApiJson,
    htmx,
    period::Period,
    stores::{SQLiteTransactionStore, TransactionStore},
    timezone::local_offset,
    transaction::{Transaction, TransactionForm},
};

/// The state needed to create or edit a transaction.
#[derive(Debug, Clone)]
pub struct WriteTransactionState {
    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for WriteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with the created transaction.
pub async fn create_transaction_endpoint(
    State(state): State<WriteTransactionState>,
    ApiJson(form): ApiJson<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let local_offset = local_offset(&state.local_timezone)?;

    let transaction = state.transaction_store.create(&form, local_offset)?;
    tracing::debug!("created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// A route handler for the new transaction form.
///
/// Redirects to the transactions page for the month the transaction falls
/// in, or responds with an alert if the form is invalid.
pub async fn create_transaction_form_endpoint(
    State(state): State<WriteTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let result = local_offset(&state.local_timezone).and_then(|local_offset| {
        let transaction = state.transaction_store.create(&form, local_offset)?;
        tracing::debug!("created transaction {}", transaction.id);

        Ok(Period::from_timestamp(transaction.date, local_offset))
    });

    match result {
        Ok(month) => htmx::redirect(endpoints::with_month(endpoints::TRANSACTIONS_VIEW, month)),
        Err(error) => error.into_alert_response(),
    }
}
