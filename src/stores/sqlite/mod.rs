//! SQLite implementations of the store traits.

mod budget;
mod transaction;

pub use budget::SQLiteBudgetStore;
pub use transaction::SQLiteTransactionStore;
