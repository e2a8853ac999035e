//! Card components for the headline numbers on the dashboard.

use maud::{Markup, html};
use time::{UtcOffset, macros::format_description};

use crate::{
    dashboard::summary::DashboardSummary,
    html::{BADGE_STYLE, CARD_STYLE, format_currency},
    transaction::Transaction,
};

fn card(title: &str, id: &str, body: Markup) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE) data-summary-card="true" {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            (body)
        }
    }
}

fn footnote(text: &str) -> Markup {
    html! {
        p class="mt-1 text-xs text-gray-500 dark:text-gray-400" { (text) }
    }
}

/// Renders the total expenses, total income, net balance and top category cards.
pub(super) fn summary_cards_view(summary: &DashboardSummary) -> Markup {
    let net_class = if summary.net_balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };
    let net_label = if summary.net_balance < 0.0 {
        "Deficit"
    } else {
        "Surplus"
    };

    html! {
        section class="w-full grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-8" {
            (card("Total Expenses", "total-expenses", html! {
                p class="text-2xl font-bold text-red-600 dark:text-red-400" {
                    (format_currency(summary.total_expenses))
                }
                (footnote(&format!("{} expense transactions", summary.expense_count)))
            }))

            (card("Total Income", "total-income", html! {
                p class="text-2xl font-bold text-green-600 dark:text-green-400" {
                    (format_currency(summary.total_income))
                }
                (footnote(&format!("{} income transactions", summary.income_count)))
            }))

            (card("Net Balance", "net-balance", html! {
                p class={ "text-2xl font-bold " (net_class) } {
                    (format_currency(summary.net_balance))
                }
                (footnote(net_label))
            }))

            (card("Top Expense Category", "top-expense-category", html! {
                @match &summary.top_expense_category {
                    Some(top) => {
                        p class="text-2xl font-bold" { (top.category) }
                        (footnote(&format!("{} spent", format_currency(top.amount))))
                    }
                    None => {
                        p class="text-2xl font-bold" { "None" }
                        (footnote("No expenses recorded"))
                    }
                }
            }))
        }
    }
}

/// Renders the card for the latest transaction.
pub(super) fn recent_transaction_view(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let date = transaction
        .date
        .to_offset(local_offset)
        .date()
        .format(format_description!("[day] [month repr:short] [year]"))
        .unwrap_or_else(|_| transaction.date.date().to_string());
    let (sign, amount_class) = if transaction.is_expense {
        ("-", "text-red-600 dark:text-red-400")
    } else {
        ("+", "text-green-600 dark:text-green-400")
    };

    card(
        "Most Recent Transaction",
        "most-recent-transaction",
        html! {
            div class="flex justify-between items-center gap-4 mt-2" {
                div {
                    p class="font-semibold" { (transaction.description) }
                    p class="text-xs text-gray-500 dark:text-gray-400" {
                        time datetime=(transaction.date.to_offset(local_offset).date()) { (date) }
                    }
                }
                span class=(BADGE_STYLE) { (transaction.category) }
                span class={ "text-lg font-bold tabular-nums " (amount_class) } {
                    (sign) (format_currency(transaction.amount))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::{UtcOffset, macros::datetime};

    use crate::{
        category::Category,
        dashboard::summary::{CategoryTotal, DashboardSummary},
        transaction::Transaction,
    };

    use super::{recent_transaction_view, summary_cards_view};

    fn text_of(html: &Html, selector: &str) -> String {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("could not find {selector:?}"))
            .text()
            .collect()
    }

    fn summary(net_balance: f64) -> DashboardSummary {
        DashboardSummary {
            total_expenses: 150.0,
            total_income: 150.0 + net_balance,
            net_balance,
            expense_count: 2,
            income_count: 1,
            top_expense_category: Some(CategoryTotal {
                category: Category::FoodAndDining,
                amount: 150.0,
            }),
            expenses_by_category: vec![],
            most_recent_transaction: None,
            monthly_expenses: vec![],
        }
    }

    #[test]
    fn shows_deficit() {
        let html = Html::parse_fragment(&summary_cards_view(&summary(-20.0)).into_string());

        let net_balance = text_of(&html, "#net-balance");
        assert!(net_balance.contains("-$20.00"), "{net_balance}");
        assert!(net_balance.contains("Deficit"));
        assert!(text_of(&html, "#top-expense-category").contains("Food & Dining"));
    }

    #[test]
    fn shows_surplus() {
        let html = Html::parse_fragment(&summary_cards_view(&summary(30.0)).into_string());

        assert!(text_of(&html, "#net-balance").contains("Surplus"));
    }

    #[test]
    fn shows_recent_transaction() {
        let transaction = Transaction {
            id: 1,
            amount: 42.0,
            date: datetime!(2024-03-05 10:00 UTC),
            description: "Dinner".to_owned(),
            category: Category::FoodAndDining,
            is_expense: true,
            created_at: datetime!(2024-03-05 10:00 UTC),
            updated_at: datetime!(2024-03-05 10:00 UTC),
        };

        let html = Html::parse_fragment(
            &recent_transaction_view(&transaction, UtcOffset::UTC).into_string(),
        );

        let text = text_of(&html, "#most-recent-transaction");
        assert!(text.contains("Dinner"));
        assert!(text.contains("05 Mar 2024"));
        assert!(text.contains("-$42.00"));
    }
}
