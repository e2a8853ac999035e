//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params_from_iter, types::Value};
use time::UtcOffset;

use crate::{
    Error,
    stores::{TransactionQuery, TransactionStore},
    transaction::{
        NewTransaction, TRANSACTION_COLUMNS, Transaction, TransactionForm, TransactionId,
        map_transaction_row, now_to_the_second,
    },
};

/// Stores transactions in a SQLite database.
///
/// The `"transaction"` table must already exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn create(
        &self,
        form: &TransactionForm,
        local_offset: UtcOffset,
    ) -> Result<Transaction, Error> {
        let transaction = form.validate(None, local_offset)?;
        let connection = self.lock()?;

        insert_transaction(&transaction, &connection)
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        get_transaction(id, &connection)
    }

    /// Retrieve transactions matching `query`.
    ///
    /// Transactions are sorted by date, newest first. Transactions with the
    /// same date are sorted by ID, newest first.
    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut clauses = Vec::new();
        let mut parameters = Vec::new();

        if let Some(from) = query.from {
            clauses.push("date >= ?");
            parameters.push(Value::Integer(from.unix_timestamp()));
        }

        if let Some(until) = query.until {
            clauses.push("date < ?");
            parameters.push(Value::Integer(until.unix_timestamp()));
        }

        if let Some(category) = query.category {
            clauses.push("category = ?");
            parameters.push(Value::Text(category.as_str().to_owned()));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"{where_clause} \
                ORDER BY date DESC, id DESC"
            ))?
            .query_map(params_from_iter(parameters), map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    fn update(
        &self,
        id: TransactionId,
        form: &TransactionForm,
        local_offset: UtcOffset,
    ) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let existing = get_transaction(id, &connection)?;
        let transaction = form.validate(Some(&existing), local_offset)?;

        connection
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET amount = ?1, date = ?2, description = ?3, category = ?4, is_expense = ?5,
                     updated_at = ?6
                 WHERE id = ?7
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    transaction.amount,
                    transaction.date.unix_timestamp(),
                    &transaction.description,
                    transaction.category,
                    transaction.is_expense,
                    now_to_the_second().unix_timestamp(),
                    id,
                ),
                map_transaction_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
                error => error.into(),
            })
    }

    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )?;

        match rows_affected {
            0 => Err(Error::TransactionNotFound),
            _ => Ok(()),
        }
    }
}

fn insert_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\"
                (amount, date, description, category, is_expense, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                transaction.amount,
                transaction.date.unix_timestamp(),
                &transaction.description,
                transaction.category,
                transaction.is_expense,
                now_to_the_second().unix_timestamp(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => error.into(),
        })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{
        UtcOffset,
        macros::{datetime, offset},
    };

    use crate::{
        Error,
        category::Category,
        db::initialize,
        period::Period,
        stores::{SQLiteTransactionStore, TransactionQuery, TransactionStore},
        transaction::TransactionForm,
    };

    fn get_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    fn form(amount: f64, date: &str, category: Category) -> TransactionForm {
        TransactionForm {
            amount: Some(amount),
            date: Some(date.to_owned()),
            description: Some(format!("{category} on {date}")),
            category: Some(category.to_string()),
            is_expense: None,
        }
    }

    #[test]
    fn create_then_get() {
        let store = get_store();

        let created = store
            .create(
                &form(12.3, "2024-03-05T10:00:00Z", Category::Travel),
                UtcOffset::UTC,
            )
            .unwrap();
        let got = store.get(created.id).unwrap();

        assert_eq!(created, got);
        assert_eq!(got.amount, 12.3);
        assert_eq!(got.date, datetime!(2024-03-05 10:00 UTC));
        assert_eq!(got.category, Category::Travel);
        assert!(got.is_expense);
        assert_eq!(got.created_at, got.updated_at);
    }

    #[test]
    fn create_rejects_invalid_form() {
        let store = get_store();

        let result = store.create(&TransactionForm::default(), UtcOffset::UTC);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(store.list(&TransactionQuery::default()), Ok(vec![]));
    }

    #[test]
    fn get_missing_transaction() {
        let store = get_store();

        assert_eq!(store.get(42), Err(Error::TransactionNotFound));
    }

    #[test]
    fn list_is_newest_first() {
        let store = get_store();
        let older = store
            .create(&form(1.0, "2024-01-01", Category::Other), UtcOffset::UTC)
            .unwrap();
        let newer = store
            .create(&form(2.0, "2024-02-01", Category::Other), UtcOffset::UTC)
            .unwrap();

        let got = store.list(&TransactionQuery::default()).unwrap();

        assert_eq!(got, vec![newer, older]);
    }

    #[test]
    fn list_filters_by_period_and_category() {
        let store = get_store();
        let local_offset = offset!(+13);
        let in_march = store
            .create(
                &form(1.0, "2024-03-01", Category::FoodAndDining),
                local_offset,
            )
            .unwrap();
        // Still February in local time.
        store
            .create(
                &form(2.0, "2024-02-29T23:59:59+13:00", Category::FoodAndDining),
                local_offset,
            )
            .unwrap();
        store
            .create(&form(3.0, "2024-04-01", Category::FoodAndDining), local_offset)
            .unwrap();
        store
            .create(&form(4.0, "2024-03-10", Category::Housing), local_offset)
            .unwrap();

        let query = TransactionQuery::in_period("2024-03".parse::<Period>().unwrap(), local_offset)
            .with_category(Some(Category::FoodAndDining));
        let got = store.list(&query).unwrap();

        assert_eq!(got, vec![in_march]);
    }

    #[test]
    fn update_is_partial() {
        let store = get_store();
        let created = store
            .create(&form(10.0, "2024-03-05", Category::Shopping), UtcOffset::UTC)
            .unwrap();

        let updated = store
            .update(
                created.id,
                &TransactionForm {
                    amount: Some(25.0),
                    ..Default::default()
                },
                UtcOffset::UTC,
            )
            .unwrap();

        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.date, created.date);
        assert_eq!(store.get(created.id), Ok(updated));
    }

    #[test]
    fn update_missing_transaction() {
        let store = get_store();

        let result = store.update(42, &TransactionForm::default(), UtcOffset::UTC);

        assert_eq!(result, Err(Error::TransactionNotFound));
    }

    #[test]
    fn delete_removes_transaction() {
        let store = get_store();
        let created = store
            .create(&form(10.0, "2024-03-05", Category::Shopping), UtcOffset::UTC)
            .unwrap();

        assert_eq!(store.delete(created.id), Ok(()));
        assert_eq!(store.get(created.id), Err(Error::TransactionNotFound));
        assert_eq!(store.delete(created.id), Err(Error::TransactionNotFound));
    }
}
