//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::{endpoints, period::Period};

/// The pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Transactions,
    Budgets,
}

impl Page {
    const ALL: [Page; 3] = [Page::Dashboard, Page::Transactions, Page::Budgets];

    fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Transactions => "Transactions",
            Page::Budgets => "Budgets",
        }
    }

    fn url(self) -> &'static str {
        match self {
            Page::Dashboard => endpoints::DASHBOARD_VIEW,
            Page::Transactions => endpoints::TRANSACTIONS_VIEW,
            Page::Budgets => endpoints::BUDGETS_VIEW,
        }
    }

    /// Whether the page shows one month at a time.
    fn is_monthly(self) -> bool {
        matches!(self, Page::Transactions | Page::Budgets)
    }
}

/// The navigation bar for a page.
///
/// When a month is set, the links to the monthly pages keep that month so
/// that moving between transactions and budgets stays on the same month.
#[derive(Debug, Clone)]
pub struct NavBar {
    current: Page,
    month: Option<Period>,
}

impl NavBar {
    pub fn new(current: Page) -> Self {
        Self {
            current,
            month: None,
        }
    }

    pub fn with_month(mut self, month: Option<Period>) -> Self {
        self.month = month;
        self
    }

    fn href(&self, page: Page) -> String {
        match self.month {
            Some(month) if page.is_monthly() => endpoints::with_month(page.url(), month),
            _ => page.url().to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let link_style = |page: Page| {
            if page == self.current {
                "px-3 py-2 rounded-lg text-sm font-semibold text-blue-700 bg-blue-50
                dark:text-blue-200 dark:bg-blue-900/30"
            } else {
                "px-3 py-2 rounded-lg text-sm font-medium text-gray-700 hover:text-blue-700
                hover:bg-gray-100 dark:text-gray-300 dark:hover:text-white dark:hover:bg-gray-800"
            }
        };

        html!(
            header class="bg-white border-b border-gray-200 dark:bg-gray-900 dark:border-gray-700"
            {
                nav
                    class="max-w-screen-xl mx-auto flex flex-wrap items-center gap-4 px-4 py-3"
                    aria-label="Primary"
                {
                    a
                        href=(endpoints::ROOT)
                        class="mr-auto text-xl font-semibold text-gray-900 dark:text-white"
                    {
                        "Finance Tracker"
                    }

                    ul class="order-last w-full flex gap-1 sm:order-none sm:w-auto"
                    {
                        @for page in Page::ALL {
                            li
                            {
                                a
                                    href=(self.href(page))
                                    class=(link_style(page))
                                    aria-current=[(page == self.current).then_some("page")]
                                {
                                    (page.title())
                                }
                            }
                        }
                    }

                    @if let Some(month) = self.month {
                        span
                            class="text-sm text-gray-500 dark:text-gray-400"
                            data-nav-month=(month)
                        {
                            (month.label())
                        }
                    }

                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class="px-3 py-2 text-sm font-medium text-white bg-blue-600 rounded-lg
                            hover:bg-blue-700"
                    {
                        "+ Transaction"
                    }
                }
            }
        )
    }
}
