//! Defines the transaction store trait.

use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    category::Category,
    period::Period,
    transaction::{Transaction, TransactionForm, TransactionId},
};

/// Handles the creation, retrieval and modification of transactions.
pub trait TransactionStore {
    /// Validate `form` and create a new transaction in the store.
    ///
    /// Date-only values in the form are taken as midnight in `local_offset`.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the form is invalid.
    fn create(&self, form: &TransactionForm, local_offset: UtcOffset)
    -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if `id` does not refer to a transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve transactions matching `query`, newest first.
    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Apply the fields present in `form` to an existing transaction.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if `id` does not refer to a
    /// transaction, or [Error::Validation] if the merged result is invalid.
    fn update(
        &self,
        id: TransactionId,
        form: &TransactionForm,
        local_offset: UtcOffset,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if `id` does not refer to a transaction.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::list].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions on or after this instant.
    pub from: Option<OffsetDateTime>,
    /// Only include transactions strictly before this instant.
    pub until: Option<OffsetDateTime>,
    /// Only include transactions in this category.
    pub category: Option<Category>,
}

impl TransactionQuery {
    /// A query for the transactions dated within `period` in the timezone `local_offset`.
    pub fn in_period(period: Period, local_offset: UtcOffset) -> Self {
        let (from, until) = period.utc_bounds(local_offset);

        Self {
            from: Some(from),
            until,
            category: None,
        }
    }

    /// Restrict the query to `category`, if given.
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }
}
