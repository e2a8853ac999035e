//! Defines the route handler for the page for editing a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    endpoints::{self, format_endpoint},
    html::{LINK_STYLE, base},
    navigation::{NavBar, Page},
    period::Period,
    stores::TransactionStore,
    timezone::local_offset,
    transaction::{
        ListTransactionsState, Transaction,
        create_page::{FormAction, TransactionFormValues, transaction_form},
        parse_transaction_id,
    },
};

fn edit_transaction_view(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let date = transaction.date.to_offset(local_offset).date();
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    let period = Period::from_date(date);
    let nav_bar = NavBar::new(Page::Transactions)
        .with_month(Some(period))
        .into_html();

    let values = TransactionFormValues {
        amount: Some(transaction.amount),
        date,
        description: &transaction.description,
        category: transaction.category,
        is_expense: transaction.is_expense,
    };
    let action = FormAction::Update(format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id));

    let content = html!(
        (nav_bar)
        (transaction_form(action, &values, date.max(today)))

        p class="text-center text-sm"
        {
            a href=(endpoints::with_month(endpoints::TRANSACTIONS_VIEW, period)) class=(LINK_STYLE)
            {
                "Back to transactions"
            }
        }
    );

    base("Edit Transaction", &[], &content)
}

/// Renders the page for editing a transaction.
pub async fn get_edit_transaction_page(
    State(state): State<ListTransactionsState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let result = parse_transaction_id(&transaction_id).and_then(|transaction_id| {
        let local_offset = local_offset(&state.local_timezone)?;
        let transaction = state.transaction_store.get(transaction_id)?;

        Ok(edit_transaction_view(&transaction, local_offset))
    });

    match result {
        Ok(view) => view.into_response(),
        Err(error) => error.into_page_response(),
    }
}
