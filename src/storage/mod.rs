//! Storage layer for the expense tracker
//!
//! JSON file repositories with atomic writes, coordinated by [`Storage`],
//! which implements the [`Backend`] contract used by the services.

pub mod backend;
pub mod budget_goals;
pub mod expenses;
pub mod file_io;

pub use backend::Backend;
pub use budget_goals::BudgetGoalRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use chrono::NaiveDate;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetGoal, BudgetGoalId, Expense, ExpenseId, MonthPeriod, OwnerId};

pub(crate) fn lock_poisoned<E: std::fmt::Display>(e: E) -> TrackerError {
    TrackerError::Storage(format!("Lock poisoned: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub expenses: ExpenseRepository,
    pub goals: BudgetGoalRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            goals: BudgetGoalRepository::new(paths.budget_goals_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), TrackerError> {
        self.expenses.load()?;
        self.goals.load()?;
        log::debug!(
            "loaded {} expenses and {} budget goals from {}",
            self.expenses.count()?,
            self.goals.count()?,
            self.paths.data_dir().display()
        );
        Ok(())
    }

    /// Append to the audit log; the data write already succeeded, so a
    /// failure here is only reported.
    fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            log::warn!("audit log write failed: {}", e);
        }
    }
}

impl Backend for Storage {
    fn expenses_for_owner(&self, owner: &OwnerId) -> TrackerResult<Vec<Expense>> {
        self.expenses.for_owner(owner)
    }

    fn expenses_in_range(
        &self,
        owner: &OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrackerResult<Vec<Expense>> {
        self.expenses.in_range(owner, start, end)
    }

    fn get_expense(&self, owner: &OwnerId, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        self.expenses.get(owner, id)
    }

    fn insert_expense(&self, expense: Expense) -> TrackerResult<()> {
        let entry = AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            expense.owner_id.clone(),
            Some(expense.description.clone()),
            &expense,
        );
        self.expenses.insert(expense)?;
        self.expenses.save()?;
        self.record(entry);
        Ok(())
    }

    fn update_expense(&self, expense: Expense) -> TrackerResult<bool> {
        let Some(before) = self.expenses.get(&expense.owner_id, expense.id)? else {
            return Ok(false);
        };
        let entry = AuditEntry::update(
            EntityType::Expense,
            expense.id.to_string(),
            expense.owner_id.clone(),
            Some(expense.description.clone()),
            &before,
            &expense,
        );
        if !self.expenses.update(expense)? {
            return Ok(false);
        }
        self.expenses.save()?;
        self.record(entry);
        Ok(true)
    }

    fn delete_expense(&self, owner: &OwnerId, id: ExpenseId) -> TrackerResult<bool> {
        let Some(removed) = self.expenses.delete(owner, id)? else {
            return Ok(false);
        };
        self.expenses.save()?;
        self.record(AuditEntry::delete(
            EntityType::Expense,
            id.to_string(),
            owner.clone(),
            Some(removed.description.clone()),
            &removed,
        ));
        Ok(true)
    }

    fn goals_matching(
        &self,
        owner: &OwnerId,
        period: &MonthPeriod,
        category: &str,
    ) -> TrackerResult<Vec<BudgetGoal>> {
        self.goals.matching(owner, period, category)
    }

    fn goals_for_owner(&self, owner: &OwnerId) -> TrackerResult<Vec<BudgetGoal>> {
        self.goals.for_owner(owner)
    }

    fn get_goal(&self, owner: &OwnerId, id: BudgetGoalId) -> TrackerResult<Option<BudgetGoal>> {
        self.goals.get(owner, id)
    }

    fn insert_goal(&self, goal: BudgetGoal) -> TrackerResult<()> {
        let entry = AuditEntry::create(
            EntityType::BudgetGoal,
            goal.id.to_string(),
            goal.owner_id.clone(),
            Some(goal.to_string()),
            &goal,
        );
        self.goals.insert(goal)?;
        self.goals.save()?;
        self.record(entry);
        Ok(())
    }

    fn update_goal(&self, goal: BudgetGoal) -> TrackerResult<bool> {
        let Some(before) = self.goals.get(&goal.owner_id, goal.id)? else {
            return Ok(false);
        };
        let entry = AuditEntry::update(
            EntityType::BudgetGoal,
            goal.id.to_string(),
            goal.owner_id.clone(),
            Some(goal.to_string()),
            &before,
            &goal,
        );
        if !self.goals.update(goal)? {
            return Ok(false);
        }
        self.goals.save()?;
        self.record(entry);
        Ok(true)
    }

    fn delete_goal(&self, owner: &OwnerId, id: BudgetGoalId) -> TrackerResult<bool> {
        let Some(removed) = self.goals.delete(owner, id)? else {
            return Ok(false);
        };
        self.goals.save()?;
        self.record(AuditEntry::delete(
            EntityType::BudgetGoal,
            id.to_string(),
            owner.clone(),
            Some(removed.to_string()),
            &removed,
        ));
        Ok(true)
    }
}
