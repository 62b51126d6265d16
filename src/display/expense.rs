//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::truncate;
use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, in the order given
pub fn format_expense_list(expenses: &[Expense], currency: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short(),
        date: e.date.format(date_format).to_string(),
        description: truncate(&e.description, 30),
        category: e.category.clone(),
        amount: e.amount.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

pub fn format_expense_details(expense: &Expense, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id.short()));
    output.push_str(&format!("Date:        {}\n", expense.date.format(date_format)));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));

    output
}
