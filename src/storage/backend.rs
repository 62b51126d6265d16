//! The persistence contract the services are written against

use chrono::NaiveDate;

use crate::error::TrackerResult;
use crate::models::{BudgetGoal, BudgetGoalId, Expense, ExpenseId, MonthPeriod, OwnerId};

/// Owner-scoped record storage for expenses and budget goals
///
/// Every query takes the owner explicitly; rows of one owner are never
/// visible through another owner's queries. Writes are durable once the
/// call returns `Ok`.
pub trait Backend {
    /// All of `owner`'s expenses, newest first
    fn expenses_for_owner(&self, owner: &OwnerId) -> TrackerResult<Vec<Expense>>;

    /// `owner`'s expenses dated within `start..=end`
    fn expenses_in_range(
        &self,
        owner: &OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrackerResult<Vec<Expense>>;

    fn get_expense(&self, owner: &OwnerId, id: ExpenseId) -> TrackerResult<Option<Expense>>;

    fn insert_expense(&self, expense: Expense) -> TrackerResult<()>;

    /// Replace the row with the same id and owner; `Ok(false)` if there is none
    fn update_expense(&self, expense: Expense) -> TrackerResult<bool>;

    /// `Ok(false)` if `owner` has no expense with this id
    fn delete_expense(&self, owner: &OwnerId, id: ExpenseId) -> TrackerResult<bool>;

    /// Goals for exactly `(period, category)`, in insertion order
    fn goals_matching(
        &self,
        owner: &OwnerId,
        period: &MonthPeriod,
        category: &str,
    ) -> TrackerResult<Vec<BudgetGoal>>;

    fn goals_for_owner(&self, owner: &OwnerId) -> TrackerResult<Vec<BudgetGoal>>;

    fn get_goal(&self, owner: &OwnerId, id: BudgetGoalId) -> TrackerResult<Option<BudgetGoal>>;

    fn insert_goal(&self, goal: BudgetGoal) -> TrackerResult<()>;

    fn update_goal(&self, goal: BudgetGoal) -> TrackerResult<bool>;

    fn delete_goal(&self, owner: &OwnerId, id: BudgetGoalId) -> TrackerResult<bool>;
}
