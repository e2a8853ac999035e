//! Transactions: the model, its validation and table schema, plus the JSON
//! API endpoints, and the pages for listing, creating and editing transactions.

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod get_endpoint;
mod list_endpoint;
mod transactions_page;

pub use core::{
    NewTransaction, Transaction, TransactionForm, TransactionId, create_transaction_table,
    map_transaction_row, parse_transaction_id,
};
pub(crate) use core::{TRANSACTION_COLUMNS, get_timestamp, now_to_the_second};
pub use create_endpoint::{
    WriteTransactionState, create_transaction_endpoint, create_transaction_form_endpoint,
};
pub use create_page::{CreateTransactionPageState, get_create_transaction_page};
pub use delete_endpoint::{delete_transaction_endpoint, delete_transaction_row_endpoint};
pub use edit_endpoint::{edit_transaction_endpoint, edit_transaction_form_endpoint};
pub use edit_page::get_edit_transaction_page;
pub use get_endpoint::{TransactionStoreState, get_transaction_endpoint};
pub use list_endpoint::{ListTransactionsState, TransactionFilters, list_transactions_endpoint};
pub(crate) use list_endpoint::parse_category_filter;
pub use transactions_page::get_transactions_page;
