//! Shared page layout, styles and formatting helpers for the HTML views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto max-w-md text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-gray-300 dark:border-gray-600 dark:placeholder-gray-400 \
    focus:ring-blue-600 focus:border-blue-600 focus:dark:border-blue-500 \
    focus:dark:ring-blue-500";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_SELECT_STYLE: &str = "block p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-gray-300 dark:border-gray-600 focus:ring-blue-600 \
    focus:border-blue-600 focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card and badge styles
pub const CARD_STYLE: &str = "rounded-lg border border-gray-200 bg-white p-4 \
    shadow-sm dark:border-gray-700 dark:bg-gray-800";

pub const BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-blue-800 bg-blue-100 rounded-full \
    dark:bg-blue-900 dark:text-blue-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The htmx bundle that drives the forms and delete buttons.
pub const HTMX_SCRIPT: &str = "/static/htmx-2.0.8-min.js";
/// The htmx extension that swaps error responses into the alert container.
pub const HTMX_RESPONSE_TARGETS_SCRIPT: &str = "/static/htmx-ext-response-targets-2.0.4.js";

/// The element that form errors are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Finance Tracker" }
                link href="/static/main.css" rel="stylesheet";

                script src=(HTMX_SCRIPT) {}
                script src=(HTMX_RESPONSE_TARGETS_SCRIPT) {}

                style
                {
                    r#"
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                div
                    id=(ALERT_CONTAINER_ID)
                    class="fixed bottom-4 left-1/2 z-50 w-full max-w-md -translate-x-1/2 px-4"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format `number` as dollars and cents, e.g. "$1,234.50" or "-$5.00".
pub fn format_currency(number: f64) -> String {
    static FORMATTER: OnceLock<Option<Formatter>> = OnceLock::new();

    let sign = if number < 0.0 { "-" } else { "" };
    let magnitude = number.abs();

    if magnitude == 0.0 {
        // numfmt renders zero as "0", so zero is spelled out here.
        return "$0.00".to_owned();
    }

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    match formatter {
        Some(formatter) => format!("{sign}{}", pad_cents(formatter.fmt_string(magnitude))),
        None => format!("{sign}${magnitude:.2}"),
    }
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_cents(mut text: String) -> String {
    match text.rfind('.') {
        Some(dot) => {
            let decimals = text.len() - dot - 1;
            for _ in decimals..2 {
                text.push('0');
            }
        }
        None => text.push_str(".00"),
    }

    text
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}

#[cfg(test)]
mod tests {
    use super::{format_currency, pad_cents};

    #[test]
    fn formats_dollars_and_cents() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(-5.0), "-$5.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(0.99), "$0.99");
    }

    #[test]
    fn pads_missing_cents() {
        assert_eq!(pad_cents("$5".to_owned()), "$5.00");
        assert_eq!(pad_cents("$5.5".to_owned()), "$5.50");
        assert_eq!(pad_cents("$5.55".to_owned()), "$5.55");
    }
}
