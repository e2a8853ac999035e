//! Defines the budget model, its validation and table schema.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, category::Category, period::Period, transaction::get_timestamp};

/// Alias for the integer type used for budget IDs.
pub type BudgetId = i64;

/// A spending limit for one category in one month.
///
/// At most one budget exists for each category and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The category the limit applies to.
    pub category: Category,
    /// The most that should be spent in the category, always positive.
    pub amount: f64,
    /// The month the limit applies to.
    pub month: Period,
    /// Free text notes about the budget.
    pub notes: Option<String>,
    /// When the budget was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the budget was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Parse a budget ID from a path segment.
///
/// # Errors
/// Returns [Error::InvalidBudgetId] if `text` is not a positive integer.
pub fn parse_budget_id(text: &str) -> Result<BudgetId, Error> {
    match text.parse::<BudgetId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidBudgetId(text.to_owned())),
    }
}

/// The validated fields of a budget that is about to be written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    /// The category the limit applies to.
    pub category: Category,
    /// The most that should be spent in the category.
    pub amount: f64,
    /// The month the limit applies to.
    pub month: Period,
    /// Trimmed notes, `None` when blank.
    pub notes: Option<String>,
}

/// The JSON body for creating or replacing a budget.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetForm {
    /// One of the category labels, e.g. "Housing".
    pub category: Option<String>,
    /// The spending limit.
    pub amount: Option<f64>,
    /// The month in the format YYYY-MM.
    pub month: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

impl BudgetForm {
    /// Check the form.
    ///
    /// # Errors
    /// Returns [Error::MissingBudgetFields] if the category, amount or month
    /// is missing, otherwise [Error::Validation] listing every invalid field.
    pub fn validate(&self) -> Result<NewBudget, Error> {
        let (Some(category), Some(amount), Some(month)) =
            (&self.category, self.amount, &self.month)
        else {
            return Err(Error::MissingBudgetFields);
        };

        let mut problems = Vec::new();

        let category = category.parse::<Category>().map_err(|error| {
            problems.push(error.to_string());
        });

        if !amount.is_finite() || amount <= 0.0 {
            problems.push("Amount must be a positive number".to_owned());
        }

        let month = month.parse::<Period>().map_err(|_| {
            problems.push(format!("Month \"{month}\" must be in the format YYYY-MM"));
        });

        let (Ok(category), Ok(month), true) = (category, month, problems.is_empty()) else {
            return Err(Error::Validation(problems));
        };

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_owned);

        Ok(NewBudget {
            category,
            amount,
            month,
            notes,
        })
    }
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                month TEXT NOT NULL,
                notes TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                UNIQUE(category, month)
                )",
        (),
    )?;

    Ok(())
}

/// The columns read by [map_budget_row], in order.
pub(crate) const BUDGET_COLUMNS: &str =
    "id, category, amount, month, notes, created_at, updated_at";

/// Map a database row to a Budget.
pub fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        notes: row.get(4)?,
        created_at: get_timestamp(row, 5)?,
        updated_at: get_timestamp(row, 6)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{Error, budget::BudgetForm, category::Category};

    fn form(category: &str, amount: f64, month: &str) -> BudgetForm {
        BudgetForm {
            category: Some(category.to_owned()),
            amount: Some(amount),
            month: Some(month.to_owned()),
            notes: None,
        }
    }

    #[test]
    fn validates_complete_form() {
        let mut form = form("Food & Dining", 400.0, "2024-03");
        form.notes = Some("  Includes takeaways ".to_owned());

        let got = form.validate().unwrap();

        assert_eq!(got.category, Category::FoodAndDining);
        assert_eq!(got.amount, 400.0);
        assert_eq!(got.month.to_string(), "2024-03");
        assert_eq!(got.notes.as_deref(), Some("Includes takeaways"));
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut form = form("Housing", 1.0, "2024-03");
        form.notes = Some("   ".to_owned());

        assert_eq!(form.validate().unwrap().notes, None);
    }

    #[test]
    fn missing_required_fields() {
        let complete = form("Housing", 1.0, "2024-03");

        for incomplete in [
            BudgetForm {
                category: None,
                ..complete.clone()
            },
            BudgetForm {
                amount: None,
                ..complete.clone()
            },
            BudgetForm {
                month: None,
                ..complete.clone()
            },
        ] {
            assert_eq!(incomplete.validate(), Err(Error::MissingBudgetFields));
        }
    }

    #[test]
    fn reports_each_invalid_field() {
        let Err(Error::Validation(problems)) = form("Rent", -1.0, "2024-3").validate() else {
            panic!("expected a validation error");
        };

        assert_eq!(problems.len(), 3, "got {problems:?}");
        assert!(problems[0].contains("Rent"));
        assert_eq!(problems[1], "Amount must be a positive number");
        assert!(problems[2].contains("2024-3"));
    }

    #[test]
    fn rejects_zero_amount() {
        assert_eq!(
            form("Housing", 0.0, "2024-03").validate(),
            Err(Error::Validation(vec![
                "Amount must be a positive number".to_owned()
            ]))
        );
    }
}
