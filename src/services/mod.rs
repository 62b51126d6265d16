//! Service layer for the expense tracker
//!
//! Services sit between the CLI and the [`Backend`](crate::storage::Backend):
//! they take the resolved [`Session`](crate::session::Session), validate
//! input, and turn collaborator failures into short user-facing messages.

pub mod aggregation;
pub mod budget;
pub mod dashboard;
pub mod expense;

#[cfg(test)]
pub(crate) mod testing;

pub use budget::{collapse_lookup_failure, BudgetService};
pub use dashboard::{DashboardService, DashboardView};
pub use expense::{BudgetWarning, ExpenseInput, ExpenseService, SubmitOutcome};
