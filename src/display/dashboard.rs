//! Dashboard rendering
//!
//! Each chart of the dashboard becomes a titled table with a text bar column.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::bar;
use crate::models::Money;
use crate::services::DashboardView;

const BAR_WIDTH: usize = 24;

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

fn section(output: &mut String, title: &str, body: String) {
    output.push_str(title);
    output.push('\n');
    output.push_str(&body);
    output.push_str("\n\n");
}

/// Bar-column rows for (label, amount) pairs, scaled to the largest amount
fn series_rows(items: impl Iterator<Item = (String, Money)>, currency: &str) -> Vec<SeriesRow> {
    let items: Vec<_> = items.collect();
    let max = items.iter().map(|(_, m)| m.cents()).max().unwrap_or(0);
    items
        .into_iter()
        .map(|(label, total)| SeriesRow {
            label,
            total: total.format_with_symbol(currency),
            bar: bar(total.cents(), max, BAR_WIDTH),
        })
        .collect()
}

pub fn format_dashboard(view: &DashboardView, currency: &str, date_format: &str) -> String {
    if view.is_empty() {
        return "No expenses recorded yet.".to_string();
    }

    let mut output = format!(
        "Dashboard: {} expenses, {} total\n\n",
        view.expense_count,
        view.total_spent.format_with_symbol(currency)
    );

    let max_share = view
        .by_category
        .iter()
        .map(|c| c.total.cents())
        .max()
        .unwrap_or(0);
    let shares = view
        .by_category
        .iter()
        .map(|c| ShareRow {
            category: c.category.clone(),
            total: c.total.format_with_symbol(currency),
            share: format!("{:.1}%", c.percent),
            bar: bar(c.total.cents(), max_share, BAR_WIDTH),
        })
        .collect();
    section(&mut output, "Expenses by Category", render::<ShareRow>(shares));

    section(
        &mut output,
        "Spending Over Time",
        render(series_rows(
            view.spending_over_time
                .iter()
                .map(|p| (p.date.format(date_format).to_string(), p.amount)),
            currency,
        )),
    );

    section(
        &mut output,
        "Monthly Spending Trend",
        render(series_rows(
            view.monthly.iter().map(|m| (m.label.clone(), m.total)),
            currency,
        )),
    );

    section(
        &mut output,
        "Top Categories",
        render(series_rows(
            view.top_categories
                .iter()
                .map(|c| (c.category.clone(), c.total)),
            currency,
        )),
    );

    section(
        &mut output,
        "Spending by Day of Week",
        render(series_rows(
            view.by_weekday.iter().map(|(day, total)| (day.to_string(), total)),
            currency,
        )),
    );

    let comparison = view
        .budget_vs_actual
        .iter()
        .map(|row| ComparisonRow {
            category: row.category.clone(),
            budget: row.budget.format_with_symbol(currency),
            actual: row.actual.format_with_symbol(currency),
            remaining: row.remaining().format_with_symbol(currency),
            status: if row.is_over_budget() { "Over" } else { "OK" },
        })
        .collect();
    section(&mut output, "Budget vs Actual", render::<ComparisonRow>(comparison));

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGoal, Expense, MonthPeriod, OwnerId};
    use chrono::NaiveDate;

    fn expense(date: &str, dollars: i64, category: &str) -> Expense {
        Expense::new(
            OwnerId::new("u"),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            "x",
            Money::from_units(dollars),
            category,
        )
    }

    #[test]
    fn test_empty_dashboard() {
        let view = DashboardView::build(&[], &[], 5);
        assert_eq!(format_dashboard(&view, "$", "%Y-%m-%d"), "No expenses recorded yet.");
    }

    #[test]
    fn test_all_sections_rendered() {
        let expenses = vec![
            expense("2025-01-05", 20, "Food"),
            expense("2025-01-20", 30, "Food"),
            expense("2025-02-01", 10, "Transport"),
        ];
        let goals = vec![BudgetGoal::new(
            OwnerId::new("u"),
            MonthPeriod::new(2025, 1).unwrap(),
            "Food",
            Money::from_units(40),
        )];
        let output = format_dashboard(&DashboardView::build(&expenses, &goals, 5), "$", "%Y-%m-%d");

        for title in [
            "Expenses by Category",
            "Spending Over Time",
            "Monthly Spending Trend",
            "Top Categories",
            "Spending by Day of Week",
            "Budget vs Actual",
        ] {
            assert!(output.contains(title), "missing section {}", title);
        }
        assert!(output.starts_with("Dashboard: 3 expenses, $60.00 total"));
        assert!(output.contains("Jan 2025"));
        assert!(output.contains("83.3%"));
        assert!(output.contains("Over"));
        assert!(output.contains("-$10.00"));
    }
}
