//! Defines the route handler for the page that displays transactions as a table.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{UtcOffset, macros::format_description};

use crate::{
    Error,
    category::Category,
    endpoints::{self, format_endpoint},
    html::{
        ALERT_CONTAINER_ID, BUTTON_DELETE_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::{NavBar, Page},
    period::Period,
    stores::TransactionStore,
    timezone::local_offset,
    transaction::{ListTransactionsState, Transaction, TransactionFilters},
};

/// Route handler for the transactions page.
///
/// Accepts the same `month` and `category` filters as the transactions API.
pub async fn get_transactions_page(
    State(state): State<ListTransactionsState>,
    Query(filters): Query<TransactionFilters>,
) -> Response {
    match load_transactions(&state, &filters) {
        Ok((transactions, local_offset)) => {
            transactions_view(&transactions, &filters, local_offset).into_response()
        }
        Err(error) => error.into_page_response(),
    }
}

fn load_transactions(
    state: &ListTransactionsState,
    filters: &TransactionFilters,
) -> Result<(Vec<Transaction>, UtcOffset), Error> {
    let local_offset = local_offset(&state.local_timezone)?;
    let query = filters.to_query(local_offset)?;
    let transactions = state
        .transaction_store
        .list(&query)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok((transactions, local_offset))
}

fn amount_class(transaction: &Transaction) -> &'static str {
    if transaction.is_expense {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    }
}

fn filter_form(filters: &TransactionFilters) -> Markup {
    let month = filters.month.as_deref().unwrap_or_default();
    let selected_category = filters.category.as_deref().unwrap_or_default();

    html!(
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-wrap items-end gap-4 mb-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                input
                    type="month"
                    id="month"
                    name="month"
                    value=(month)
                    class=(FORM_SELECT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select id="category" name="category" class=(FORM_SELECT_STYLE)
                {
                    option value="" selected[selected_category.is_empty()] { "All categories" }

                    @for category in Category::ALL {
                        option
                            value=(category.as_str())
                            selected[selected_category == category.as_str()]
                        {
                            (category)
                        }
                    }
                }
            }

            button
                type="submit"
                class="px-4 py-2.5 text-sm font-medium text-white bg-blue-600
                    rounded hover:bg-blue-700 dark:bg-blue-600 dark:hover:bg-blue-700"
            {
                "Filter"
            }

            a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Clear" }
        }
    )
}

fn transactions_view(
    transactions: &[Transaction],
    filters: &TransactionFilters,
    local_offset: UtcOffset,
) -> Markup {
    let month = filters
        .month
        .as_deref()
        .and_then(|month| month.parse::<Period>().ok());
    let nav_bar = NavBar::new(Page::Transactions)
        .with_month(month)
        .into_html();
    let date_format = format_description!("[year]-[month]-[day]");

    let table_row = |transaction: &Transaction| {
        let date = transaction
            .date
            .to_offset(local_offset)
            .date()
            .format(date_format)
            .unwrap_or_else(|_| transaction.date.date().to_string());
        let sign = if transaction.is_expense { "-" } else { "+" };

        html!(
            tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
            {
                td class=(TABLE_CELL_STYLE) { time datetime=(date) { (date) } }
                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                td class=(TABLE_CELL_STYLE)
                {
                    @if transaction.is_expense { "Expense" } @else { "Income" }
                }
                td class={ "px-6 py-4 text-right " (amount_class(transaction)) }
                {
                    (sign) (format_currency(transaction.amount))
                }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a
                            href=(format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                            class=(LINK_STYLE)
                        {
                            "Edit"
                        }

                        button
                            hx-delete=(format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id))
                            hx-confirm={
                                "Are you sure you want to delete '" (transaction.description) "'?"
                            }
                            hx-target="closest tr"
                            hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                            hx-swap="delete"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative w-full max-w-screen-xl"
            {
                div class="flex justify-between items-center mb-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "New transaction"
                    }
                }

                (filter_form(filters))

                div class="overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (table_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions found. "
                                        a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                                        {
                                            "Record a transaction"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}
