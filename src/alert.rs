//! Alerts for reporting a failed form submission.
//!
//! Alerts are HTML fragments that htmx swaps into the page's alert container,
//! successful submissions redirect instead.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An error message shown to the user after submitting a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// A short headline.
    pub message: String,
    /// What went wrong, one entry per problem.
    pub details: Vec<String>,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html!(
            div
                role="alert"
                class="p-4 mb-4 text-sm border rounded-lg text-red-800 border-red-300
                    bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                data-alert="true"
            {
                p class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    ul class="mt-1.5 list-disc list-inside"
                    {
                        @for detail in &self.details {
                            li { (detail) }
                        }
                    }
                }

                button
                    type="button"
                    class="mt-2 text-xs underline"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "Dismiss"
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn lists_every_detail() {
        let alert = Alert {
            message: "Validation failed".to_owned(),
            details: vec![
                "Amount must be a positive number".to_owned(),
                "Description is required".to_owned(),
            ],
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let items: Vec<String> = html
            .select(&Selector::parse("li").unwrap())
            .map(|item| item.text().collect())
            .collect();
        assert_eq!(
            items,
            vec!["Amount must be a positive number", "Description is required"]
        );
        assert!(html.html().contains("Validation failed"));
    }

    #[test]
    fn omits_empty_detail_list() {
        let alert = Alert {
            message: "Budget not found".to_owned(),
            details: Vec::new(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        assert!(html.select(&Selector::parse("ul").unwrap()).next().is_none());
    }
}
