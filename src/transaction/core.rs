//! Defines the core data models, validation and table schema for transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{Error, category::Category};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction is filed under.
    pub category: Category,
    /// Whether money was spent (`true`) or earned (`false`).
    pub is_expense: bool,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Parse a transaction ID from a path segment.
///
/// # Errors
/// Returns [Error::InvalidTransactionId] if `text` is not a positive integer.
pub fn parse_transaction_id(text: &str) -> Result<TransactionId, Error> {
    match text.parse::<TransactionId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidTransactionId(text.to_owned())),
    }
}

/// The validated fields of a transaction that is about to be written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// When the transaction happened.
    pub date: OffsetDateTime,
    /// A trimmed, non-empty description.
    pub description: String,
    /// The category the transaction is filed under.
    pub category: Category,
    /// Whether money was spent (`true`) or earned (`false`).
    pub is_expense: bool,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// The JSON body for creating or updating a transaction.
///
/// Every field is optional so that the same shape can be used for partial
/// updates. Missing fields are filled from the existing transaction on update,
/// or from the defaults on create.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    /// The amount of money spent or earned.
    pub amount: Option<f64>,
    /// An RFC 3339 timestamp or a date in the format YYYY-MM-DD.
    ///
    /// Dates are stored to the second, so fractional seconds are dropped.
    pub date: Option<String>,
    /// What the transaction was for.
    pub description: Option<String>,
    /// One of the category labels, e.g. "Food & Dining".
    pub category: Option<String>,
    /// Whether money was spent (`true`) or earned (`false`).
    pub is_expense: Option<bool>,
}

impl TransactionForm {
    /// Check the form and fill in missing fields.
    ///
    /// When `existing` is `Some`, the form is treated as a partial update and
    /// missing fields keep the existing values. Date-only values are taken as
    /// midnight in the timezone `local_offset`.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every invalid field.
    pub fn validate(
        &self,
        existing: Option<&Transaction>,
        local_offset: UtcOffset,
    ) -> Result<NewTransaction, Error> {
        let mut problems = Vec::new();

        let amount = match self.amount.or(existing.map(|transaction| transaction.amount)) {
            None => {
                problems.push("Amount is required".to_owned());
                0.0
            }
            Some(amount) if !amount.is_finite() || amount <= 0.0 => {
                problems.push("Amount must be a positive number".to_owned());
                amount
            }
            Some(amount) => amount,
        };

        let description = match (&self.description, existing) {
            (Some(description), _) => description.trim().to_owned(),
            (None, Some(transaction)) => transaction.description.clone(),
            (None, None) => String::new(),
        };
        if description.is_empty() {
            problems.push("Description is required".to_owned());
        }

        let category = match (&self.category, existing) {
            (Some(label), _) => label.parse::<Category>().unwrap_or_else(|error| {
                problems.push(error.to_string());
                Category::Other
            }),
            (None, Some(transaction)) => transaction.category,
            (None, None) => Category::Other,
        };

        let date = match (&self.date, existing) {
            (Some(text), _) => parse_transaction_date(text, local_offset).unwrap_or_else(|| {
                problems.push(format!(
                    "Date \"{text}\" must be an RFC 3339 timestamp or a date in the format YYYY-MM-DD"
                ));
                OffsetDateTime::UNIX_EPOCH
            }),
            (None, Some(transaction)) => transaction.date,
            (None, None) => now_to_the_second(),
        };

        let is_expense = self
            .is_expense
            .or(existing.map(|transaction| transaction.is_expense))
            .unwrap_or(true);

        if !problems.is_empty() {
            return Err(Error::Validation(problems));
        }

        Ok(NewTransaction {
            amount,
            date,
            description,
            category,
            is_expense,
        })
    }
}

/// Parse an RFC 3339 timestamp truncated to whole seconds, or a date taken as local midnight.
fn parse_transaction_date(text: &str, local_offset: UtcOffset) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(timestamp.replace_nanosecond(0).unwrap_or(timestamp));
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_offset(local_offset))
}

/// The current time truncated to whole seconds, matching the database precision.
pub(crate) fn now_to_the_second() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_nanosecond(0).unwrap_or(now)
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// Timestamps are stored as unix seconds so that they sort and compare numerically.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                date INTEGER NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                is_expense INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_category ON \"transaction\"(date, category);",
        (),
    )?;

    Ok(())
}

/// The columns read by [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, amount, date, description, category, is_expense, created_at, updated_at";

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: get_timestamp(row, 2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        is_expense: row.get(5)?,
        created_at: get_timestamp(row, 6)?,
        updated_at: get_timestamp(row, 7)?,
    })
}

/// Read a column of unix seconds as a UTC timestamp.
pub(crate) fn get_timestamp(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let seconds: i64 = row.get(index)?;

    OffsetDateTime::from_unix_timestamp(seconds).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(error))
    })
}

// ============================================================================
// TESTS
// ============================================================================
