//! Defines the route handler for the page for editing a budget.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    budget::{
        Budget, BudgetStoreState,
        create_page::{BudgetFormValues, budget_form},
        parse_budget_id,
    },
    endpoints::{self, format_endpoint},
    html::{LINK_STYLE, base},
    navigation::{NavBar, Page},
    stores::BudgetStore,
};

fn edit_budget_view(budget: &Budget) -> Markup {
    let nav_bar = NavBar::new(Page::Budgets)
        .with_month(Some(budget.month))
        .into_html();
    let values = BudgetFormValues {
        category: Some(budget.category),
        amount: Some(budget.amount),
        month: budget.month,
        notes: budget.notes.as_deref().unwrap_or_default(),
    };
    let update_url = format_endpoint(endpoints::BUDGET_VIEW, budget.id);

    let content = html!(
        (nav_bar)
        (budget_form(Some(update_url), &values))

        p class="text-center text-sm"
        {
            a href=(endpoints::with_month(endpoints::BUDGETS_VIEW, budget.month)) class=(LINK_STYLE)
            {
                "Back to budgets"
            }
        }
    );

    base("Edit Budget", &[], &content)
}

/// Renders the page for editing a budget.
pub async fn get_edit_budget_page(
    State(state): State<BudgetStoreState>,
    Path(budget_id): Path<String>,
) -> Response {
    let budget =
        parse_budget_id(&budget_id).and_then(|budget_id| state.budget_store.get(budget_id));

    match budget {
        Ok(budget) => edit_budget_view(&budget).into_response(),
        Err(error) => error.into_page_response(),
    }
}
