//! Defines the route handler for the page comparing a month's budgets with actual spending.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    budget::Budget,
    dashboard::charts::{DashboardChart, budget_vs_actual_chart, chart_head_elements, charts_view},
    endpoints::{self, format_endpoint},
    html::{
        ALERT_CONTAINER_ID, BUTTON_DELETE_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, link,
    },
    navigation::{NavBar, Page},
    period::Period,
    reconciliation::{
        BudgetReconciliation, ReconciliationQuery, ReconciliationState, aggregate_expenses,
        reconcile,
    },
    stores::{BudgetQuery, BudgetStore, TransactionQuery, TransactionStore},
    timezone::local_offset,
};

/// How many months the month selector offers.
const SELECTABLE_MONTHS: usize = 12;

/// A budget alongside how it compares to actual spending.
struct BudgetRow {
    reconciliation: BudgetReconciliation,
    notes: Option<String>,
}

/// Route handler for the budgets page.
pub async fn get_budgets_page(
    State(state): State<ReconciliationState>,
    Query(query): Query<ReconciliationQuery>,
) -> Response {
    match load_budget_rows(&state, query.month.as_deref()) {
        Ok((rows, selected, current)) => budgets_view(&rows, selected, current).into_response(),
        Err(error) => error.into_page_response(),
    }
}

fn load_budget_rows(
    state: &ReconciliationState,
    month: Option<&str>,
) -> Result<(Vec<BudgetRow>, Period, Period), Error> {
    let local_offset = local_offset(&state.local_timezone)?;
    let current = Period::current(local_offset);
    let selected = Period::parse_or_current(month, local_offset)?;

    let budgets = state
        .budget_store
        .list(&BudgetQuery {
            month: Some(selected),
            category: None,
        })
        .inspect_err(|error| tracing::error!("could not list budgets: {error}"))?;
    let transactions = state
        .transaction_store
        .list(&TransactionQuery::in_period(selected, local_offset))
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    let totals = aggregate_expenses(&transactions, selected, local_offset);
    let mut notes: HashMap<_, _> = budgets
        .iter()
        .map(|budget: &Budget| (budget.id, budget.notes.clone()))
        .collect();
    let rows = reconcile(&totals, &budgets, selected)
        .into_iter()
        .map(|reconciliation| BudgetRow {
            notes: notes.remove(&reconciliation.budget_id).flatten(),
            reconciliation,
        })
        .collect();

    Ok((rows, selected, current))
}

/// The months offered by the month selector, newest first.
///
/// `selected` is included even when it falls outside the last twelve months.
fn selectable_months(selected: Period, current: Period) -> Vec<Period> {
    let mut months = current.last_n(SELECTABLE_MONTHS);
    months.reverse();

    if !months.contains(&selected) {
        months.push(selected);
        months.sort_by(|a, b| b.cmp(a));
    }

    months
}

fn month_selector(selected: Period, current: Period) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::BUDGETS_VIEW)
            class="flex items-end gap-4 mb-6"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                select
                    id="month"
                    name="month"
                    class=(FORM_SELECT_STYLE)
                    onchange="this.form.submit()"
                {
                    @for month in selectable_months(selected, current) {
                        option value=(month) selected[month == selected] { (month.label()) }
                    }
                }
            }

            noscript
            {
                button
                    type="submit"
                    class="px-4 py-2.5 text-sm font-medium text-white bg-blue-600 rounded"
                {
                    "Show"
                }
            }
        }
    )
}

fn budget_card(row: &BudgetRow) -> Markup {
    let reconciliation = &row.reconciliation;
    let colour = reconciliation.status.colour();
    let width = reconciliation.percent_used.clamp(0, 100);

    html!(
        div class=(CARD_STYLE) data-budget-card=(reconciliation.budget_id)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400"
            {
                (reconciliation.category)
            }

            p class="text-2xl font-bold" style={ "color: " (colour) ";" }
            {
                (format_currency(reconciliation.actual))
                span class="ml-1 text-sm font-normal text-gray-500 dark:text-gray-400"
                {
                    "/ " (format_currency(reconciliation.budgeted))
                }
            }

            div
                class="w-full h-2 mt-2 bg-gray-200 rounded-full dark:bg-gray-700"
                role="progressbar"
                aria-valuenow=(reconciliation.percent_used)
                aria-valuemin="0"
                aria-valuemax="100"
            {
                div
                    class="h-2 rounded-full"
                    style={ "width: " (width) "%; background-color: " (colour) ";" }
                {}
            }

            div class="flex justify-between mt-1 text-xs"
            {
                span class="font-medium" style={ "color: " (colour) ";" }
                {
                    (reconciliation.percent_used) "% used"
                }
                span class="text-gray-500 dark:text-gray-400" data-status=(reconciliation.status.label())
                {
                    (reconciliation.status.label())
                }
            }
        }
    )
}

fn budget_table(rows: &[BudgetRow]) -> Markup {
    html!(
        div class="w-full overflow-x-auto dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right
                text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class="px-6 py-4 text-right" { "Budgeted" }
                        th scope="col" class="px-6 py-4 text-right" { "Actual" }
                        th scope="col" class="px-6 py-4 text-right" { "Remaining" }
                        th scope="col" class="px-6 py-4 text-right" { "Over" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Notes" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        @let reconciliation = &row.reconciliation;
                        tr class=(TABLE_ROW_STYLE) data-budget-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (reconciliation.category) }
                            td class="px-6 py-4 text-right" { (format_currency(reconciliation.budgeted)) }
                            td class="px-6 py-4 text-right" { (format_currency(reconciliation.actual)) }
                            td class="px-6 py-4 text-right" { (format_currency(reconciliation.remaining)) }
                            td class="px-6 py-4 text-right" { (format_currency(reconciliation.over_budget)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span style={ "color: " (reconciliation.status.colour()) ";" }
                                {
                                    (reconciliation.status.label())
                                }
                            }
                            td class=(TABLE_CELL_STYLE) { (row.notes.as_deref().unwrap_or_default()) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                div class="flex gap-4"
                                {
                                    a
                                        href=(format_endpoint(endpoints::EDIT_BUDGET_VIEW, reconciliation.budget_id))
                                        class=(LINK_STYLE)
                                    {
                                        "Edit"
                                    }

                                    button
                                        hx-delete=(format_endpoint(endpoints::BUDGET_VIEW, reconciliation.budget_id))
                                        hx-confirm={
                                            "Are you sure you want to delete the "
                                            (reconciliation.category) " budget?"
                                        }
                                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                                        class=(BUTTON_DELETE_STYLE)
                                    {
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn budgets_view(rows: &[BudgetRow], selected: Period, current: Period) -> Markup {
    let nav_bar = NavBar::new(Page::Budgets)
        .with_month(Some(selected))
        .into_html();
    let reconciliations: Vec<BudgetReconciliation> =
        rows.iter().map(|row| row.reconciliation.clone()).collect();
    let charts = [DashboardChart {
        id: "budget-vs-actual-chart",
        options: budget_vs_actual_chart(&reconciliations).to_string(),
    }];
    let new_budget_url = endpoints::with_month(endpoints::NEW_BUDGET_VIEW, selected);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                div class="flex justify-between items-center"
                {
                    h1 class="text-xl font-bold" { "Budgets" }

                    a href=(new_budget_url) class=(LINK_STYLE) { "Add budget" }
                }
                p class="mb-4 text-sm text-gray-600 dark:text-gray-400"
                {
                    "Track your spending against budgeted amounts."
                }

                (month_selector(selected, current))

                h2 class="text-lg font-semibold mb-4" { "Budget Summary: " (selected.label()) }

                @if rows.is_empty() {
                    p class="py-4 text-center text-gray-500 dark:text-gray-400" data-empty-state="true"
                    {
                        "No budgets set for this month. "
                        (link(&new_budget_url, "Add a budget"))
                        " to get started."
                    }
                } @else {
                    section class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-8"
                    {
                        @for row in rows {
                            (budget_card(row))
                        }
                    }

                    (charts_view(&charts))

                    (budget_table(rows))
                }
            }
        }
    );

    if rows.is_empty() {
        base("Budgets", &[], &content)
    } else {
        base("Budgets", &chart_head_elements(&charts), &content)
    }
}
