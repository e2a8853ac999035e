//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/budgets/{budget_id}', use [format_endpoint].

use crate::period::Period;

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The overview page with the summary cards and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying transactions, HTML forms for new transactions are posted here.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page with the form for recording a transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The route HTML forms for an existing transaction are sent to.
pub const TRANSACTION_VIEW: &str = "/transactions/{transaction_id}";
/// The page with the form for editing a transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page for comparing a month's budgets against actual spending, HTML
/// forms for new budgets are posted here.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page with the form for setting a budget.
pub const NEW_BUDGET_VIEW: &str = "/budgets/new";
/// The route HTML forms for an existing budget are sent to.
pub const BUDGET_VIEW: &str = "/budgets/{budget_id}";
/// The page with the form for editing a budget.
pub const EDIT_BUDGET_VIEW: &str = "/budgets/{budget_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The prefix shared by all JSON API routes.
pub const API_PREFIX: &str = "/api";
/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
/// The route to list and create budgets.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to access a single budget.
pub const BUDGET_API: &str = "/api/budgets/{budget_id}";
/// The route to reconcile a month's budgets against its transactions.
pub const RECONCILIATION_API: &str = "/api/reconciliation";
/// The route for the dashboard totals.
pub const SUMMARY_API: &str = "/api/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/budgets/{budget_id}', '{budget_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// Add the `month` query parameter to `endpoint_path`, e.g. '/budgets?month=2024-03'.
pub fn with_month(endpoint_path: &str, month: Period) -> String {
    format!("{endpoint_path}?month={month}")
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::BUDGETS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_BUDGET_VIEW);
        assert_endpoint_is_valid_uri(endpoints::BUDGET_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_BUDGET_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::API_PREFIX);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION_API);
        assert_endpoint_is_valid_uri(endpoints::BUDGETS_API);
        assert_endpoint_is_valid_uri(endpoints::BUDGET_API);
        assert_endpoint_is_valid_uri(endpoints::RECONCILIATION_API);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::BUDGET_API, 1);

        assert_eq!(formatted_path, "/api/budgets/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn edit_page_links() {
        assert_eq!(
            format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, 12),
            "/transactions/12/edit"
        );
        assert_eq!(format_endpoint(endpoints::EDIT_BUDGET_VIEW, 3), "/budgets/3/edit");
    }

    #[test]
    fn month_query() {
        let month = "2024-03".parse().unwrap();

        assert_eq!(
            super::with_month(endpoints::BUDGETS_VIEW, month),
            "/budgets?month=2024-03"
        );
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
