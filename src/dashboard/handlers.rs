//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and the summary API
//! - HTML view functions for rendering the dashboard UI

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    AppState, Error,
    dashboard::{
        cards::{recent_transaction_view, summary_cards_view},
        charts::{
            DashboardChart, category_pie_chart, chart_head_elements, charts_view,
            monthly_expenses_chart,
        },
        summary::DashboardSummary,
    },
    endpoints,
    html::{base, link},
    navigation::{NavBar, Page},
    period::Period,
    stores::{SQLiteTransactionStore, TransactionQuery, TransactionStore},
    timezone::local_offset,
};

/// The state needed for the dashboard page and the summary API.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store to read transactions from.
    pub transaction_store: SQLiteTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Summarises every transaction as of the current month.
fn build_summary(state: &DashboardState) -> Result<(DashboardSummary, UtcOffset), Error> {
    let local_offset = local_offset(&state.local_timezone)?;
    let transactions = state
        .transaction_store
        .list(&TransactionQuery::default())
        .inspect_err(|error| tracing::error!("Could not get transactions for dashboard: {error}"))?;

    let summary = DashboardSummary::new(&transactions, Period::current(local_offset), local_offset);

    Ok((summary, local_offset))
}

/// Display a page with an overview of the user's data.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let nav_bar = NavBar::new(Page::Dashboard);

    match build_summary(&state) {
        Ok((summary, local_offset)) => match &summary.most_recent_transaction {
            Some(_) => dashboard_view(nav_bar, &summary, local_offset).into_response(),
            None => dashboard_no_data_view(nav_bar).into_response(),
        },
        Err(error) => error.into_page_response(),
    }
}

/// A route handler that responds with the dashboard summary as JSON.
pub async fn get_summary_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<DashboardSummary>, Error> {
    build_summary(&state).map(|(summary, _)| Json(summary))
}

/// Creates the dashboard charts from the summary.
fn build_dashboard_charts(summary: &DashboardSummary) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "monthly-expenses-chart",
            options: monthly_expenses_chart(&summary.monthly_expenses).to_string(),
        },
        DashboardChart {
            id: "category-pie-chart",
            options: category_pie_chart(&summary.expenses_by_category).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "recording a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                Start by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn dashboard_view(nav_bar: NavBar, summary: &DashboardSummary, local_offset: UtcOffset) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = build_dashboard_charts(summary);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(summary))

            @if let Some(transaction) = &summary.most_recent_transaction {
                div class="w-full mb-8"
                {
                    (recent_transaction_view(transaction, local_offset))
                }
            }

            (charts_view(&charts))
        }
    );

    base("Dashboard", &chart_head_elements(&charts), &content)
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::{Html, Selector};
    use serde_json::{Value, json};
    use time::UtcOffset;

    use crate::{
        dashboard::handlers::DashboardState,
        endpoints,
        period::Period,
        stores::TransactionStore,
        test_utils::{assert_valid_html, get_test_app_state, get_test_server, parse_html_document},
        transaction::TransactionForm,
    };

    use super::get_dashboard_page;

    fn get_state() -> DashboardState {
        let state = get_test_app_state();

        DashboardState {
            transaction_store: state.transaction_store,
            local_timezone: state.local_timezone,
        }
    }

    fn add_transaction(state: &DashboardState, amount: f64, category: &str, is_expense: bool) {
        state
            .transaction_store
            .create(
                &TransactionForm {
                    amount: Some(amount),
                    description: Some(format!("{category} transaction")),
                    category: Some(category.to_owned()),
                    is_expense: Some(is_expense),
                    ..Default::default()
                },
                UtcOffset::UTC,
            )
            .unwrap();
    }

    #[track_caller]
    fn assert_exists(html: &Html, selector: &str) {
        let parsed = Selector::parse(selector).unwrap();
        assert!(
            html.select(&parsed).next().is_some(),
            "Could not find '{selector}'"
        );
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_state();
        add_transaction(&state, 100.0, "Food & Dining", true);
        add_transaction(&state, 40.0, "Income", false);

        let response = get_dashboard_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_exists(&html, "#total-expenses");
        assert_exists(&html, "#total-income");
        assert_exists(&html, "#net-balance");
        assert_exists(&html, "#top-expense-category");
        assert_exists(&html, "#most-recent-transaction");
        assert_exists(&html, "#monthly-expenses-chart");
        assert_exists(&html, "#category-pie-chart");
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let response = get_dashboard_page(State(get_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let charts = Selector::parse("#charts").unwrap();
        assert!(html.select(&charts).next().is_none());
        assert!(html.html().contains("Nothing here yet..."));
        let link = Selector::parse("p a").unwrap();
        let link = html.select(&link).next().expect("No link to the new transaction page");
        assert_eq!(link.value().attr("href"), Some(endpoints::NEW_TRANSACTION_VIEW));
    }

    #[tokio::test]
    async fn summary_endpoint_returns_totals() {
        let state = get_test_app_state();
        let server = get_test_server(state);
        for body in [
            json!({"amount": 100, "description": "Groceries", "category": "Food & Dining"}),
            json!({"amount": 25, "description": "Cinema", "category": "Entertainment"}),
            json!({"amount": 40, "description": "Refund", "category": "Income", "isExpense": false}),
        ] {
            server
                .post(endpoints::TRANSACTIONS_API)
                .json(&body)
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get(endpoints::SUMMARY_API).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["totalExpenses"], 125.0);
        assert_eq!(body["totalIncome"], 40.0);
        assert_eq!(body["netBalance"], -85.0);
        assert_eq!(body["topExpenseCategory"]["category"], "Food & Dining");
        assert_eq!(body["expensesByCategory"].as_array().unwrap().len(), 2);
        assert_eq!(body["monthlyExpenses"].as_array().unwrap().len(), 6);

        let current_month = Period::current(UtcOffset::UTC).to_string();
        assert_eq!(body["monthlyExpenses"][5]["month"], current_month);
        assert_eq!(body["monthlyExpenses"][5]["amount"], 125.0);
    }
}
