//! Budget goal repository for JSON storage
//!
//! Goals are kept in insertion order: when duplicates exist for the same
//! (owner, year, month, category), the first one stored wins.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{BudgetGoal, BudgetGoalId, MonthPeriod, OwnerId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetGoalData {
    #[serde(default)]
    goals: Vec<BudgetGoal>,
}

/// Repository for budget goal persistence
pub struct BudgetGoalRepository {
    path: PathBuf,
    goals: RwLock<Vec<BudgetGoal>>,
}

impl BudgetGoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: BudgetGoalData = read_json(&self.path)?;

        let mut goals = self.goals.write().map_err(lock_poisoned)?;
        *goals = file_data.goals;
        Ok(())
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;

        let file_data = BudgetGoalData {
            goals: goals.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Goals of `owner` for `(period, category)`, in insertion order
    pub fn matching(
        &self,
        owner: &OwnerId,
        period: &MonthPeriod,
        category: &str,
    ) -> Result<Vec<BudgetGoal>, TrackerError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;

        Ok(goals
            .iter()
            .filter(|g| &g.owner_id == owner && g.applies_to(period, category))
            .cloned()
            .collect())
    }

    /// All of `owner`'s goals, in insertion order
    pub fn for_owner(&self, owner: &OwnerId) -> Result<Vec<BudgetGoal>, TrackerError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;

        Ok(goals
            .iter()
            .filter(|g| &g.owner_id == owner)
            .cloned()
            .collect())
    }

    pub fn get(&self, owner: &OwnerId, id: BudgetGoalId) -> Result<Option<BudgetGoal>, TrackerError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;

        Ok(goals
            .iter()
            .find(|g| g.id == id && &g.owner_id == owner)
            .cloned())
    }

    /// Append a goal. Duplicates for the same month and category are not rejected.
    pub fn insert(&self, goal: BudgetGoal) -> Result<(), TrackerError> {
        let mut goals = self.goals.write().map_err(lock_poisoned)?;

        if goals.iter().any(|g| g.id == goal.id) {
            return Err(TrackerError::Storage(format!(
                "Budget goal {} already exists",
                goal.id
            )));
        }

        goals.push(goal);
        Ok(())
    }

    /// Replace the goal with the same id and owner, keeping its position
    pub fn update(&self, goal: BudgetGoal) -> Result<bool, TrackerError> {
        let mut goals = self.goals.write().map_err(lock_poisoned)?;

        match goals
            .iter_mut()
            .find(|g| g.id == goal.id && g.owner_id == goal.owner_id)
        {
            Some(existing) => {
                *existing = goal;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete one of `owner`'s goals, returning the removed row
    pub fn delete(
        &self,
        owner: &OwnerId,
        id: BudgetGoalId,
    ) -> Result<Option<BudgetGoal>, TrackerError> {
        let mut goals = self.goals.write().map_err(lock_poisoned)?;

        match goals.iter().position(|g| g.id == id && &g.owner_id == owner) {
            Some(index) => Ok(Some(goals.remove(index))),
            None => Ok(None),
        }
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;
        Ok(goals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetGoalRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetGoalRepository::new(temp_dir.path().join("budget_goals.json"));
        (temp_dir, repo)
    }

    fn april() -> MonthPeriod {
        MonthPeriod::new(2025, 4).unwrap()
    }

    #[test]
    fn test_matching_keeps_insertion_order() {
        let (_temp_dir, repo) = create_test_repo();
        let owner = OwnerId::new("u");

        let first = BudgetGoal::new(owner.clone(), april(), "Transport", Money::from_units(100));
        let second = BudgetGoal::new(owner.clone(), april(), "Transport", Money::from_units(200));
        repo.insert(first.clone()).unwrap();
        repo.insert(second).unwrap();
        repo.insert(BudgetGoal::new(owner.clone(), april(), "Food", Money::from_units(50)))
            .unwrap();

        let matches = repo.matching(&owner, &april(), "Transport").unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, first.id);
    }

    #[test]
    fn test_matching_is_owner_scoped() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(BudgetGoal::new(
            OwnerId::new("alice"),
            april(),
            "Food",
            Money::from_units(100),
        ))
        .unwrap();

        assert!(repo
            .matching(&OwnerId::new("bob"), &april(), "Food")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let owner = OwnerId::new("u");
        let mut goal = BudgetGoal::new(owner.clone(), april(), "Food", Money::from_units(100));
        repo.insert(goal.clone()).unwrap();

        goal.set_goal_amount(Money::from_units(150));
        assert!(repo.update(goal.clone()).unwrap());
        assert_eq!(
            repo.get(&owner, goal.id).unwrap().unwrap().goal_amount,
            Money::from_units(150)
        );

        assert!(repo.delete(&OwnerId::new("other"), goal.id).unwrap().is_none());
        assert!(repo.delete(&owner, goal.id).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let owner = OwnerId::new("u");
        repo.insert(BudgetGoal::new(owner.clone(), april(), "Food", Money::from_units(100)))
            .unwrap();
        repo.save().unwrap();

        let repo2 = BudgetGoalRepository::new(temp_dir.path().join("budget_goals.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.for_owner(&owner).unwrap().len(), 1);
    }
}
