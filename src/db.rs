//! Opening, initializing and closing the application's SQLite database.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, budget::create_budget_table, transaction::create_transaction_table};

/// Open the database at `path`, or an in-memory database when `path` is `None`.
///
/// # Errors
/// Returns [Error::DatabaseUnavailable] if the database cannot be opened.
pub fn open(path: Option<&Path>) -> Result<Connection, Error> {
    let connection = match path {
        Some(path) => Connection::open(path),
        None => Connection::open_in_memory(),
    };

    connection.map_err(|error| {
        tracing::error!("could not open database: {error}");
        Error::DatabaseUnavailable(error.to_string())
    })
}

/// Create the tables for the domain models.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Close the shared database connection.
///
/// The connection is only closed if `connection` is the last reference to it,
/// otherwise it is closed when the last reference is dropped.
pub fn close(connection: Arc<Mutex<Connection>>) {
    let connection = match Arc::try_unwrap(connection) {
        Ok(connection) => connection,
        Err(connection) => {
            tracing::warn!(
                "database connection is still shared by {} other references, it will be closed \
                when they are dropped",
                Arc::strong_count(&connection) - 1
            );
            return;
        }
    };

    let connection = connection
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    match connection.close() {
        Ok(()) => tracing::info!("closed database connection"),
        Err((_, error)) => tracing::error!("could not close database connection: {error}"),
    }
}
