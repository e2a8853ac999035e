//! Chart generation and rendering for the dashboard and budgets pages.
//!
//! This module creates interactive ECharts visualizations:
//! - **Monthly Expenses Chart**: Total expenses for each of the last six months
//! - **Category Pie Chart**: All-time expenses split by category
//! - **Budget vs Actual Chart**: Each budget of a month next to what was spent
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle,
        JsFunction, Orient, Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::summary::{CategoryTotal, MonthlyTotal},
    html::HeadElement,
    period::Period,
    reconciliation::BudgetReconciliation,
};

/// The path of the ECharts script served from the static directory.
pub(crate) const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub(crate) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for charts.
pub(crate) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(crate) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The script elements a page needs to draw `charts`.
pub(crate) fn chart_head_elements(charts: &[DashboardChart]) -> [HeadElement; 2] {
    [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(charts),
    ]
}

pub(crate) fn monthly_expenses_chart(monthly_totals: &[MonthlyTotal]) -> Chart {
    let labels: Vec<String> = monthly_totals
        .iter()
        .map(|total| short_month_label(total.month))
        .collect();
    let values: Vec<f64> = monthly_totals.iter().map(|total| total.amount).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Expenses")
                .subtext("Last six months"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color("#ef4444"))
                .data(values),
        )
}

pub(crate) fn category_pie_chart(category_totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|total| (total.amount, total.category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .subtext("All time"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("left").top(60))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .center(vec!["60%", "55%"])
                .data(data),
        )
}

pub(crate) fn budget_vs_actual_chart(reconciliations: &[BudgetReconciliation]) -> Chart {
    let labels: Vec<&str> = reconciliations
        .iter()
        .map(|reconciliation| reconciliation.category.as_str())
        .collect();
    let budgeted: Vec<f64> = reconciliations
        .iter()
        .map(|reconciliation| reconciliation.budgeted)
        .collect();
    // Each actual bar takes the colour of its budget's status.
    let actual: Vec<DataPointItem> = reconciliations
        .iter()
        .map(|reconciliation| {
            DataPointItem::new(reconciliation.actual)
                .item_style(ItemStyle::new().color(reconciliation.status.colour()))
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Budget vs Actual"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Budgeted")
                .item_style(ItemStyle::new().color("#94a3b8"))
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(budgeted),
        )
        .series(
            Bar::new()
                .name("Actual")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(actual),
        )
}

/// e.g. "Mar 24"
fn short_month_label(period: Period) -> String {
    let month = period.month().to_string();
    let abbreviation: String = month.chars().take(3).collect();

    format!("{abbreviation} {:02}", period.year().rem_euclid(100))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use maud::PreEscaped;
    use serde_json::Value;

    use crate::{
        category::Category,
        dashboard::summary::{CategoryTotal, MonthlyTotal},
        html::HeadElement,
        period::Period,
        reconciliation::{BudgetReconciliation, BudgetStatus},
    };

    use super::{
        DashboardChart, budget_vs_actual_chart, category_pie_chart, charts_script,
        monthly_expenses_chart, short_month_label,
    };

    fn options(chart: &charming::Chart) -> Value {
        serde_json::to_value(chart).expect("Could not serialize chart")
    }

    #[test]
    fn short_month_labels() {
        let period: Period = "2024-03".parse().unwrap();

        assert_eq!(short_month_label(period), "Mar 24");
    }

    #[test]
    fn monthly_expenses_chart_has_one_bar_per_month() {
        let totals = vec![
            MonthlyTotal { month: "2024-02".parse().unwrap(), amount: 0.0 },
            MonthlyTotal { month: "2024-03".parse().unwrap(), amount: 150.0 },
        ];

        let chart = monthly_expenses_chart(&totals);

        assert!(chart.to_string().contains("\"Feb 24\""));
        assert!(chart.to_string().contains("\"Mar 24\""));
        assert_eq!(options(&chart)["series"][0]["data"], serde_json::json!([0.0, 150.0]));
    }

    #[test]
    fn pie_chart_names_categories() {
        let totals = vec![CategoryTotal { category: Category::FoodAndDining, amount: 150.0 }];

        let options = options(&category_pie_chart(&totals));

        assert_eq!(options["series"][0]["data"][0]["name"], "Food & Dining");
        assert_eq!(options["series"][0]["data"][0]["value"], 150.0);
    }

    #[test]
    fn actual_bars_use_status_colours() {
        let reconciliation = BudgetReconciliation {
            budget_id: 1,
            category: Category::FoodAndDining,
            period: "2024-03".parse().unwrap(),
            budgeted: 120.0,
            actual: 150.0,
            remaining: 0.0,
            over_budget: 30.0,
            percent_used: 125,
            status: BudgetStatus::Over,
        };

        let options = options(&budget_vs_actual_chart(&[reconciliation]));

        assert_eq!(options["series"][0]["data"], serde_json::json!([120.0]));
        assert_eq!(
            options["series"][1]["data"][0]["itemStyle"]["color"],
            BudgetStatus::Over.colour()
        );
    }

    #[test]
    fn script_initialises_each_chart() {
        let charts = [
            DashboardChart { id: "first-chart", options: "{}".to_owned() },
            DashboardChart { id: "second-chart", options: "{}".to_owned() },
        ];

        let HeadElement::ScriptSource(PreEscaped(script)) = charts_script(&charts) else {
            panic!("Expected a script source");
        };

        assert!(script.contains("document.getElementById(\"first-chart\")"));
        assert!(script.contains("document.getElementById(\"second-chart\")"));
    }
}
