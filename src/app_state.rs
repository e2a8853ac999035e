//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    stores::{SQLiteBudgetStore, SQLiteTransactionStore},
    timezone::local_offset,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection shared by the stores.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The store for transactions.
    pub transaction_store: SQLiteTransactionStore,

    /// The store for budgets.
    pub budget_store: SQLiteBudgetStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the timezone is not valid.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        local_offset(local_timezone)?;
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            transaction_store: SQLiteTransactionStore::new(connection.clone()),
            budget_store: SQLiteBudgetStore::new(connection.clone()),
            db_connection: connection,
        })
    }
}
