//! Application router configuration for the JSON API and the HTML pages.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    budget::{
        create_budget_endpoint, create_budget_form_endpoint, delete_budget_endpoint,
        delete_budget_row_endpoint, edit_budget_endpoint, edit_budget_form_endpoint,
        get_budget_endpoint, get_budgets_page, get_create_budget_page, get_edit_budget_page,
        list_budgets_endpoint,
    },
    dashboard::{get_dashboard_page, get_summary_endpoint},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    reconciliation::get_reconciliation_endpoint,
    transaction::{
        create_transaction_endpoint, create_transaction_form_endpoint, delete_transaction_endpoint,
        delete_transaction_row_endpoint, edit_transaction_endpoint, edit_transaction_form_endpoint,
        get_create_transaction_page, get_edit_transaction_page, get_transaction_endpoint,
        get_transactions_page, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page).post(create_transaction_form_endpoint),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::TRANSACTION_VIEW,
            put(edit_transaction_form_endpoint).delete(delete_transaction_row_endpoint),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::BUDGETS_VIEW,
            get(get_budgets_page).post(create_budget_form_endpoint),
        )
        .route(endpoints::NEW_BUDGET_VIEW, get(get_create_budget_page))
        .route(
            endpoints::BUDGET_VIEW,
            put(edit_budget_form_endpoint).delete(delete_budget_row_endpoint),
        )
        .route(endpoints::EDIT_BUDGET_VIEW, get(get_edit_budget_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS_API,
            get(list_budgets_endpoint).post(create_budget_endpoint),
        )
        .route(
            endpoints::BUDGET_API,
            get(get_budget_endpoint)
                .put(edit_budget_endpoint)
                .delete(delete_budget_endpoint),
        )
        .route(
            endpoints::RECONCILIATION_API,
            get(get_reconciliation_endpoint),
        )
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
