//! A personal finance tracker that records income and expenses, sets monthly
//! budgets per category and reconciles each budget against actual spending.
//!
//! This library provides a JSON REST API alongside server rendered HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod budget;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod extract;
mod html;
mod htmx;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod period;
mod reconciliation;
mod routing;
mod stores;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget::{Budget, BudgetForm, BudgetId};
pub use category::Category;
pub use dashboard::DashboardSummary;
pub use db::{close as close_db, initialize as initialize_db, open as open_db};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use period::Period;
pub use reconciliation::{
    BudgetReconciliation, BudgetStatus, NEAR_LIMIT_THRESHOLD, aggregate_expenses, reconcile,
    reconcile_period,
};
pub use routing::build_router;
pub use stores::{
    BudgetQuery, BudgetStore, SQLiteBudgetStore, SQLiteTransactionStore, TransactionQuery,
    TransactionStore,
};
pub use transaction::{NewTransaction, Transaction, TransactionForm, TransactionId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
