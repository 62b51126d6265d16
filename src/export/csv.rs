//! CSV export of expenses (spreadsheet-compatible)

use std::io::Write;

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::session::Session;
use crate::storage::Backend;

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Write the session owner's expenses, oldest first
pub fn export_expenses_csv<W: Write>(
    backend: &dyn Backend,
    session: &Session,
    writer: W,
) -> TrackerResult<()> {
    let mut expenses = backend
        .expenses_for_owner(session.owner_id())
        .map_err(|e| {
            log::error!("Error fetching expenses for export: {}", e);
            TrackerError::Lookup("Failed to load expenses.".into())
        })?;
    expenses.reverse();

    let mut csv_writer = csv::Writer::from_writer(writer);
    for expense in &expenses {
        let cents = expense.amount.cents();
        csv_writer.serialize(ExpenseRecord {
            id: expense.id.as_uuid().to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            description: &expense.description,
            category: &expense.category,
            amount: format!(
                "{}{}.{:02}",
                if cents < 0 { "-" } else { "" },
                cents.abs() / 100,
                cents.abs() % 100
            ),
        })?;
    }
    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money, OwnerId};
    use crate::services::testing::test_storage;
    use chrono::NaiveDate;

    #[test]
    fn test_csv_rows_and_quoting() {
        let (_dir, storage) = test_storage();
        let owner = OwnerId::new("me");
        for (day, desc, cents) in [(2, "Coffee, large", 450), (1, "Bus", 275)] {
            storage
                .insert_expense(Expense::new(
                    owner.clone(),
                    NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                    desc,
                    Money::from_cents(cents),
                    "Food",
                ))
                .unwrap();
        }

        let mut output = Vec::new();
        export_expenses_csv(&storage, &Session::new(owner), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "ID,Date,Description,Category,Amount");
        assert!(lines[1].contains("2025-06-01,Bus,Food,2.75"));
        assert!(lines[2].contains("\"Coffee, large\""));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_csv_has_no_rows() {
        let (_dir, storage) = test_storage();
        let mut output = Vec::new();
        export_expenses_csv(&storage, &Session::new(OwnerId::new("me")), &mut output).unwrap();
        assert!(output.is_empty());
    }
}
