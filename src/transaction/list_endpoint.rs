//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;
use time::UtcOffset;

use crate::{
    AppState, Error,
    category::Category,
    period::Period,
    stores::{SQLiteTransactionStore, TransactionQuery, TransactionStore},
    timezone::local_offset,
    transaction::Transaction,
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The store for reading transactions.
    pub transaction_store: SQLiteTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The optional filters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilters {
    /// Only list transactions from this month (YYYY-MM).
    pub month: Option<String>,
    /// Only list transactions in this category.
    pub category: Option<String>,
}

impl TransactionFilters {
    /// Convert the filters into a store query.
    ///
    /// Empty values are treated as missing.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] or [Error::Validation] for values that cannot be parsed.
    pub fn to_query(&self, local_offset: UtcOffset) -> Result<TransactionQuery, Error> {
        let category = parse_category_filter(self.category.as_deref())?;

        let query = match non_empty(self.month.as_deref()) {
            Some(month) => TransactionQuery::in_period(month.parse::<Period>()?, local_offset),
            None => TransactionQuery::default(),
        };

        Ok(query.with_category(category))
    }
}

/// Parse an optional category query parameter.
pub(crate) fn parse_category_filter(text: Option<&str>) -> Result<Option<Category>, Error> {
    non_empty(text)
        .map(|label| {
            label
                .parse::<Category>()
                .map_err(|error| Error::Validation(vec![error.to_string()]))
        })
        .transpose()
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

/// A route handler for listing transactions, newest first.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(filters): Query<TransactionFilters>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let local_offset = local_offset(&state.local_timezone)?;
    let query = filters.to_query(local_offset)?;

    state.transaction_store.list(&query).map(Json)
}
