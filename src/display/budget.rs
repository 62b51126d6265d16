//! Budget goal display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetGoal;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Goal")]
    goal: String,
}

pub fn format_goal_list(goals: &[BudgetGoal], currency: &str) -> String {
    if goals.is_empty() {
        return "No budget goals set.".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow {
        id: g.id.short(),
        month: g
            .period()
            .map(|p| p.label())
            .unwrap_or_else(|| format!("{:04}-{:02}", g.year, g.month)),
        category: g.category.clone(),
        goal: g.goal_amount.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthPeriod, OwnerId};

    #[test]
    fn test_goal_list() {
        let goal = BudgetGoal::new(
            OwnerId::new("u"),
            MonthPeriod::new(2025, 3).unwrap(),
            "Food",
            Money::from_units(500),
        );
        let output = format_goal_list(&[goal], "$");

        assert!(output.contains("Mar 2025"));
        assert!(output.contains("Food"));
        assert!(output.contains("$500.00"));
    }

    #[test]
    fn test_empty_goal_list() {
        assert_eq!(format_goal_list(&[], "$"), "No budget goals set.");
    }
}
