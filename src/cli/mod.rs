//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer. Every handler
//! receives the already-resolved [`Session`](crate::session::Session); the
//! binary decides beforehand, through the route guard, whether the command
//! may run at all.

pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod history;
pub mod session;

pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::handle_dashboard_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportFormat};
pub use history::handle_history_command;
pub use session::{handle_login, handle_logout, handle_route, handle_whoami};

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, MonthPeriod};

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::Validation(format!("Invalid date '{}': use YYYY-MM-DD", s)))
}

pub(crate) fn parse_amount(s: &str) -> TrackerResult<Money> {
    Money::parse(s).map_err(|e| TrackerError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM` month argument
pub(crate) fn parse_period(s: &str) -> TrackerResult<MonthPeriod> {
    MonthPeriod::parse(s).map_err(|e| TrackerError::Validation(e.to_string()))
}
