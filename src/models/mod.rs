//! Core data models for the expense tracker
//!
//! Expenses, monthly budget goals, money amounts, month periods and the
//! typed identifiers that tie them to an owner.

pub mod budget_goal;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use budget_goal::{BudgetGoal, GoalValidationError};
pub use expense::{Expense, ExpenseValidationError, DEFAULT_CATEGORIES};
pub use ids::{BudgetGoalId, ExpenseId, OwnerId};
pub use money::{Money, MoneyParseError};
pub use period::{MonthPeriod, PeriodParseError};
