//! Shared fixtures for service tests

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::config::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetGoal, BudgetGoalId, Expense, ExpenseId, MonthPeriod, OwnerId};
use crate::storage::{Backend, Storage};

/// File-backed storage in a fresh temp dir
pub fn test_storage() -> (TempDir, Storage) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(TrackerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
    (temp_dir, storage)
}

/// A backend whose every call fails, standing in for an unreachable store
pub struct FailingBackend;

fn offline<T>() -> TrackerResult<T> {
    Err(TrackerError::Storage("backend unavailable".into()))
}

impl Backend for FailingBackend {
    fn expenses_for_owner(&self, _: &OwnerId) -> TrackerResult<Vec<Expense>> {
        offline()
    }

    fn expenses_in_range(&self, _: &OwnerId, _: NaiveDate, _: NaiveDate) -> TrackerResult<Vec<Expense>> {
        offline()
    }

    fn get_expense(&self, _: &OwnerId, _: ExpenseId) -> TrackerResult<Option<Expense>> {
        offline()
    }

    fn insert_expense(&self, _: Expense) -> TrackerResult<()> {
        offline()
    }

    fn update_expense(&self, _: Expense) -> TrackerResult<bool> {
        offline()
    }

    fn delete_expense(&self, _: &OwnerId, _: ExpenseId) -> TrackerResult<bool> {
        offline()
    }

    fn goals_matching(&self, _: &OwnerId, _: &MonthPeriod, _: &str) -> TrackerResult<Vec<BudgetGoal>> {
        offline()
    }

    fn goals_for_owner(&self, _: &OwnerId) -> TrackerResult<Vec<BudgetGoal>> {
        offline()
    }

    fn get_goal(&self, _: &OwnerId, _: BudgetGoalId) -> TrackerResult<Option<BudgetGoal>> {
        offline()
    }

    fn insert_goal(&self, _: BudgetGoal) -> TrackerResult<()> {
        offline()
    }

    fn update_goal(&self, _: BudgetGoal) -> TrackerResult<bool> {
        offline()
    }

    fn delete_goal(&self, _: &OwnerId, _: BudgetGoalId) -> TrackerResult<bool> {
        offline()
    }
}
