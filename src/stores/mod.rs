//! Contains traits and implementations for objects that store transactions and budgets.

mod budget;
mod transaction;

pub mod sqlite;

pub use budget::{BudgetQuery, BudgetStore};
pub use sqlite::{SQLiteBudgetStore, SQLiteTransactionStore};
pub use transaction::{TransactionQuery, TransactionStore};
