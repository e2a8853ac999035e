//! Defines the route handler for the page for setting a new budget.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    category::Category,
    endpoints,
    html::{
        ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::{NavBar, Page},
    period::Period,
    timezone::local_offset,
};

/// The values a budget form starts with.
pub(super) struct BudgetFormValues<'a> {
    pub category: Option<Category>,
    pub amount: Option<f64>,
    pub month: Period,
    pub notes: &'a str,
}

/// The form shared by the new and edit budget pages.
///
/// New budgets are posted to the budgets page, edits are sent with PUT to
/// `update_url`.
pub(super) fn budget_form(update_url: Option<String>, values: &BudgetFormValues) -> Markup {
    let (hx_post, heading, submit_label) = match update_url {
        None => (Some(endpoints::BUDGETS_VIEW), "New Budget", "Create Budget"),
        Some(_) => (None, "Edit Budget", "Save Changes"),
    };

    html!(
        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=[hx_post]
                hx-put=[update_url]
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (heading) }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" disabled selected[values.category.is_none()]
                        {
                            "Select a category"
                        }

                        @for category in Category::ALL {
                            option
                                value=(category.as_str())
                                selected[values.category == Some(category)]
                            {
                                (category)
                            }
                        }
                    }
                }

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
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                    input
                        name="month"
                        id="month"
                        type="month"
                        value=(values.month)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="notes" class=(FORM_LABEL_STYLE) { "Notes" }

                    textarea
                        name="notes"
                        id="notes"
                        rows="3"
                        placeholder="Optional"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        (values.notes)
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
            }
        }
    )
}

fn create_budget_view(month: Period) -> Markup {
    let nav_bar = NavBar::new(Page::Budgets)
        .with_month(Some(month))
        .into_html();
    let values = BudgetFormValues {
        category: None,
        amount: None,
        month,
        notes: "",
    };

    let content = html!(
        (nav_bar)
        (budget_form(None, &values))
    );

    base("Create Budget", &[], &content)
}

/// The state needed for the new budget page.
#[derive(Debug, Clone)]
pub struct CreateBudgetPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateBudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month to set a budget for, defaults to the current month.
#[derive(Debug, Default, Deserialize)]
pub struct NewBudgetQuery {
    pub month: Option<String>,
}

/// Renders the page for setting a budget.
pub async fn get_create_budget_page(
    State(state): State<CreateBudgetPageState>,
    Query(query): Query<NewBudgetQuery>,
) -> Response {
    let month = local_offset(&state.local_timezone)
        .and_then(|offset| Period::parse_or_current(query.month.as_deref(), offset));

    match month {
        Ok(month) => create_budget_view(month).into_response(),
        Err(error) => error.into_page_response(),
    }
}
