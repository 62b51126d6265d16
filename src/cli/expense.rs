//! Expense CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_period};
use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::TrackerResult;
use crate::services::{ExpenseInput, ExpenseService, SubmitOutcome};
use crate::session::Session;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Date of the expense (YYYY-MM-DD)
        date: String,
        /// Amount (e.g. "12.50" or "$12.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Category (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Change fields of an existing expense
    Edit {
        /// Expense ID (full or short form)
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Number of expenses to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Only expenses in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show one expense
    Show {
        /// Expense ID (full or short form)
        id: String,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage, settings.require_budget_goal);

    match cmd {
        ExpenseCommands::Add {
            date,
            amount,
            description,
            category,
        } => {
            let category = category.unwrap_or_else(|| settings.default_category.clone());
            if !settings.is_known_category(&category) {
                log::info!("using custom category '{}'", category);
            }
            let input = ExpenseInput::new(
                parse_date(&date)?,
                description,
                parse_amount(&amount)?,
                category,
            );

            let outcome = service.submit(session, input, None)?;
            report(&outcome, "Added", settings);
        }

        ExpenseCommands::Edit {
            id,
            date,
            amount,
            description,
            category,
        } => {
            let id = service.resolve_id(session, &id)?;
            let mut input = ExpenseInput::from_expense(&service.get(session, id)?);

            if let Some(date) = date {
                input.date = parse_date(&date)?;
            }
            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(category) = category {
                input.category = category;
            }

            let outcome = service.submit(session, input, Some(id))?;
            report(&outcome, "Updated", settings);
        }

        ExpenseCommands::List { limit, month } => {
            let mut expenses = service.list(session)?;
            if let Some(month) = month {
                let period = parse_period(&month)?;
                expenses.retain(|e| period.contains(e.date));
            }
            let total = expenses.len();
            expenses.truncate(limit);

            println!(
                "{}",
                format_expense_list(&expenses, &settings.currency_symbol, &settings.date_format)
            );
            if total > expenses.len() {
                println!("Showing {} of {} expenses.", expenses.len(), total);
            }
        }

        ExpenseCommands::Show { id } => {
            let id = service.resolve_id(session, &id)?;
            let expense = service.get(session, id)?;
            print!(
                "{}",
                format_expense_details(&expense, &settings.currency_symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Delete { id } => {
            let id = service.resolve_id(session, &id)?;
            service.delete(session, id)?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}

fn report(outcome: &SubmitOutcome, verb: &str, settings: &Settings) {
    if let Some(warning) = outcome.warning {
        println!("{}", warning);
    }
    let expense = &outcome.expense;
    println!(
        "{} expense {}: {} {} ({}) on {}",
        verb,
        expense.id,
        expense.description,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.category,
        expense.date.format(&settings.date_format)
    );
}
