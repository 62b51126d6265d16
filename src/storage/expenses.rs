//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with a per-owner
//! index so every query is scoped to one user.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::TrackerError;
use crate::models::{Expense, ExpenseId, OwnerId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: owner -> expense ids
    by_owner: RwLock<HashMap<OwnerId, Vec<ExpenseId>>>,
}

/// Newest first; same-day rows by most recently created
fn newest_first(a: &Expense, b: &Expense) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_owner: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the owner index
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_poisoned)?;
        let mut by_owner = self.by_owner.write().map_err(lock_poisoned)?;

        data.clear();
        by_owner.clear();

        for expense in file_data.expenses {
            by_owner
                .entry(expense.owner_id.clone())
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(lock_poisoned)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(newest_first);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get one of `owner`'s expenses by id
    pub fn get(&self, owner: &OwnerId, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        let data = self.data.read().map_err(lock_poisoned)?;

        Ok(data.get(&id).filter(|e| &e.owner_id == owner).cloned())
    }

    /// All of `owner`'s expenses, newest first
    pub fn for_owner(&self, owner: &OwnerId) -> Result<Vec<Expense>, TrackerError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        let by_owner = self.by_owner.read().map_err(lock_poisoned)?;

        let ids = by_owner.get(owner).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// `owner`'s expenses dated within `start..=end`
    pub fn in_range(
        &self,
        owner: &OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, TrackerError> {
        Ok(self
            .for_owner(owner)?
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect())
    }

    pub fn insert(&self, expense: Expense) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(lock_poisoned)?;
        let mut by_owner = self.by_owner.write().map_err(lock_poisoned)?;

        if data.contains_key(&expense.id) {
            return Err(TrackerError::Storage(format!(
                "Expense {} already exists",
                expense.id
            )));
        }

        by_owner
            .entry(expense.owner_id.clone())
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Replace an existing expense with the same id and owner
    ///
    /// Returns `false` when no such row exists for that owner.
    pub fn update(&self, expense: Expense) -> Result<bool, TrackerError> {
        let mut data = self.data.write().map_err(lock_poisoned)?;

        match data.get_mut(&expense.id) {
            Some(existing) if existing.owner_id == expense.owner_id => {
                *existing = expense;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Delete one of `owner`'s expenses, returning the removed row
    pub fn delete(&self, owner: &OwnerId, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        let mut data = self.data.write().map_err(lock_poisoned)?;
        let mut by_owner = self.by_owner.write().map_err(lock_poisoned)?;

        if !data.get(&id).is_some_and(|e| &e.owner_id == owner) {
            return Ok(None);
        }

        let removed = data.remove(&id);
        if let Some(ids) = by_owner.get_mut(owner) {
            ids.retain(|&eid| eid != id);
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.len())
    }
}
