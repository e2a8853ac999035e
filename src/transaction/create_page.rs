//! Defines the route handler for the page for recording a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    AppState,
    category::Category,
    endpoints,
    html::{
        ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::{NavBar, Page},
    timezone::local_offset,
};

/// The values a transaction form starts with.
pub(super) struct TransactionFormValues<'a> {
    pub amount: Option<f64>,
    pub date: Date,
    pub description: &'a str,
    pub category: Category,
    pub is_expense: bool,
}

/// Where a transaction form is sent.
pub(super) enum FormAction {
    /// POST a new transaction.
    Create,
    /// PUT the changes to the transaction at this URL.
    Update(String),
}

/// The form shared by the create and edit transaction pages.
pub(super) fn transaction_form(
    action: FormAction,
    values: &TransactionFormValues,
    max_date: Date,
) -> Markup {
    let (hx_post, hx_put, heading, submit_label) = match action {
        FormAction::Create => (
            Some(endpoints::TRANSACTIONS_VIEW.to_owned()),
            None,
            "New Transaction",
            "Create Transaction",
        ),
        FormAction::Update(url) => (None, Some(url), "Edit Transaction", "Save Changes"),
    };

    html!(
        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=[hx_post]
                hx-put=[hx_put]
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (heading) }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=[values.amount]
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        max=(max_date)
                        value=(values.date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        value=(values.description)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in Category::ALL {
                            option
                                value=(category.as_str())
                                selected[category == values.category]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="isExpense" class=(FORM_LABEL_STYLE) { "Type" }

                    select name="isExpense" id="isExpense" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="true" selected[values.is_expense] { "Expense" }
                        option value="false" selected[!values.is_expense] { "Income" }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
            }
        }
    )
}

fn create_transaction_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(Page::Transactions).into_html();
    let values = TransactionFormValues {
        amount: None,
        date: today,
        description: "",
        category: Category::Other,
        is_expense: true,
    };

    let content = html!(
        (nav_bar)
        (transaction_form(FormAction::Create, &values, today))
    );

    base("Create Transaction", &[], &content)
}

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for recording a transaction.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Response {
    match local_offset(&state.local_timezone) {
        Ok(offset) => {
            let today = OffsetDateTime::now_utc().to_offset(offset).date();
            create_transaction_view(today).into_response()
        }
        Err(error) => error.into_page_response(),
    }
}
