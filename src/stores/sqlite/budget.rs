//! Implements a SQLite backed budget store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params_from_iter, types::Value};

use crate::{
    Error,
    budget::{BUDGET_COLUMNS, Budget, BudgetForm, BudgetId, NewBudget, map_budget_row},
    stores::{BudgetQuery, BudgetStore},
    transaction::now_to_the_second,
};

/// Stores budgets in a SQLite database.
///
/// Uniqueness of the category and month is checked before writing so that
/// callers get [Error::DuplicateBudget], and the table's `UNIQUE` constraint
/// catches anything that slips past the check.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
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

impl BudgetStore for SQLiteBudgetStore {
    fn create(&self, form: &BudgetForm) -> Result<Budget, Error> {
        let budget = form.validate()?;
        let connection = self.lock()?;

        ensure_unique(&budget, None, &connection)?;

        connection
            .prepare(&format!(
                "INSERT INTO budget (category, amount, month, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 RETURNING {BUDGET_COLUMNS}"
            ))?
            .query_row(
                (
                    budget.category,
                    budget.amount,
                    budget.month,
                    budget.notes.clone(),
                    now_to_the_second().unix_timestamp(),
                ),
                map_budget_row,
            )
            .map_err(|error| map_unique_violation(error, &budget))
    }

    fn get(&self, id: BudgetId) -> Result<Budget, Error> {
        let connection = self.lock()?;

        get_budget(id, &connection)
    }

    fn list(&self, query: &BudgetQuery) -> Result<Vec<Budget>, Error> {
        let mut clauses = Vec::new();
        let mut parameters = Vec::new();

        if let Some(month) = query.month {
            clauses.push("month = ?");
            parameters.push(Value::Text(month.to_string()));
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
                "SELECT {BUDGET_COLUMNS} FROM budget{where_clause} ORDER BY category, month, id"
            ))?
            .query_map(params_from_iter(parameters), map_budget_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::from))
            .collect()
    }

    fn update(&self, id: BudgetId, form: &BudgetForm) -> Result<Budget, Error> {
        let budget = form.validate()?;
        let connection = self.lock()?;

        let existing = get_budget(id, &connection)?;
        ensure_unique(&budget, Some(id), &connection)?;

        // Leaving out `notes` keeps them, an empty string clears them.
        let notes = match form.notes {
            Some(_) => budget.notes.clone(),
            None => existing.notes,
        };

        connection
            .prepare(&format!(
                "UPDATE budget
                 SET category = ?1, amount = ?2, month = ?3, notes = ?4, updated_at = ?5
                 WHERE id = ?6
                 RETURNING {BUDGET_COLUMNS}"
            ))?
            .query_row(
                (
                    budget.category,
                    budget.amount,
                    budget.month,
                    notes,
                    now_to_the_second().unix_timestamp(),
                    id,
                ),
                map_budget_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::BudgetNotFound,
                error => map_unique_violation(error, &budget),
            })
    }

    fn delete(&self, id: BudgetId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected =
            connection.execute("DELETE FROM budget WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::BudgetNotFound),
            _ => Ok(()),
        }
    }
}

fn get_budget(id: BudgetId, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(&format!("SELECT {BUDGET_COLUMNS} FROM budget WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_budget_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::BudgetNotFound,
            error => error.into(),
        })
}

/// Fail with [Error::DuplicateBudget] if a budget other than `exclude_id`
/// already has the category and month of `budget`.
fn ensure_unique(
    budget: &NewBudget,
    exclude_id: Option<BudgetId>,
    connection: &Connection,
) -> Result<(), Error> {
    let existing_id: Option<BudgetId> = connection
        .query_row(
            "SELECT id FROM budget
             WHERE category = ?1 AND month = ?2 AND (?3 IS NULL OR id != ?3)",
            (budget.category, budget.month, exclude_id),
            |row| row.get(0),
        )
        .optional()?;

    match existing_id {
        Some(_) => Err(Error::DuplicateBudget {
            category: budget.category,
            month: budget.month,
        }),
        None => Ok(()),
    }
}

fn map_unique_violation(error: rusqlite::Error, budget: &NewBudget) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        ) => Error::DuplicateBudget {
            category: budget.category,
            month: budget.month,
        },
        error => error.into(),
    }
}
