//! Budget goal model
//!
//! A monthly spending ceiling for one category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetGoalId, OwnerId};
use super::money::Money;
use super::period::MonthPeriod;

/// Monthly spending ceiling for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub id: BudgetGoalId,

    pub owner_id: OwnerId,

    /// Calendar month, 1-12
    pub month: u32,

    pub year: i32,

    /// Should match an expense category to be meaningful
    pub category: String,

    pub goal_amount: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetGoal {
    pub fn new(
        owner_id: OwnerId,
        period: MonthPeriod,
        category: impl Into<String>,
        goal_amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetGoalId::new(),
            owner_id,
            month: period.month(),
            year: period.year(),
            category: category.into(),
            goal_amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// The month this goal applies to, if the stored month/year are valid
    pub fn period(&self) -> Option<MonthPeriod> {
        MonthPeriod::new(self.year, self.month).ok()
    }

    /// Whether this goal is the one for `(period, category)`
    pub fn applies_to(&self, period: &MonthPeriod, category: &str) -> bool {
        self.year == period.year() && self.month == period.month() && self.category == category
    }

    pub fn set_goal_amount(&mut self, amount: Money) {
        self.goal_amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(GoalValidationError::InvalidMonth(self.month));
        }
        if self.category.trim().is_empty() {
            return Err(GoalValidationError::EmptyCategory);
        }
        if self.goal_amount.is_negative() {
            return Err(GoalValidationError::NegativeGoal);
        }
        Ok(())
    }
}

impl fmt::Display for BudgetGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02} {}: {}",
            self.year, self.month, self.category, self.goal_amount
        )
    }
}

/// Validation errors for budget goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    InvalidMonth(u32),
    EmptyCategory,
    NegativeGoal,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(m) => write!(f, "Invalid month: {} (must be 1-12)", m),
            Self::EmptyCategory => write!(f, "Category is required"),
            Self::NegativeGoal => write!(f, "Goal amount cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> MonthPeriod {
        MonthPeriod::new(2025, 3).unwrap()
    }

    #[test]
    fn test_applies_to() {
        let goal = BudgetGoal::new(OwnerId::new("u"), march(), "Food", Money::from_units(500));

        assert!(goal.applies_to(&march(), "Food"));
        assert!(!goal.applies_to(&march(), "food"));
        assert!(!goal.applies_to(&MonthPeriod::new(2025, 4).unwrap(), "Food"));
        assert_eq!(goal.period(), Some(march()));
    }

    #[test]
    fn test_validation() {
        let mut goal = BudgetGoal::new(OwnerId::new("u"), march(), "Food", Money::from_units(500));
        assert!(goal.validate().is_ok());

        goal.goal_amount = Money::from_cents(-100);
        assert_eq!(goal.validate(), Err(GoalValidationError::NegativeGoal));

        goal.goal_amount = Money::zero();
        goal.month = 13;
        assert_eq!(goal.validate(), Err(GoalValidationError::InvalidMonth(13)));
        assert_eq!(goal.period(), None);
    }
}
