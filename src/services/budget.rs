//! Budget service
//!
//! Goal lookups used before an expense is accepted, and management of the
//! per-month, per-category budget goals themselves.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetGoal, BudgetGoalId, Money, MonthPeriod, OwnerId};
use crate::session::Session;
use crate::storage::Backend;

/// Service for budget goals
pub struct BudgetService<'a> {
    backend: &'a dyn Backend,
}

impl<'a> BudgetService<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Whether `owner` has at least one goal for `(period, category)`
    ///
    /// `Err` means the lookup itself failed, which is not the same as
    /// `Ok(false)`.
    pub fn budget_exists(
        &self,
        owner: &OwnerId,
        period: &MonthPeriod,
        category: &str,
    ) -> TrackerResult<bool> {
        let goals = self
            .backend
            .goals_matching(owner, period, category.trim())
            .map_err(|e| {
                log::error!("Error checking budget: {}", e);
                TrackerError::Lookup("Failed to check budget.".into())
            })?;
        if goals.len() > 1 {
            log::warn!(
                "{} budget goals for {} {}; using the first",
                goals.len(),
                period,
                category
            );
        }
        Ok(!goals.is_empty())
    }

    /// The goal that applies to `(period, category)`; the first stored one
    /// when there are duplicates
    pub fn goal_for(
        &self,
        owner: &OwnerId,
        period: &MonthPeriod,
        category: &str,
    ) -> TrackerResult<Option<BudgetGoal>> {
        let goals = self.backend.goals_matching(owner, period, category.trim())?;
        if goals.len() > 1 {
            log::warn!(
                "{} budget goals for {} {}; using the first",
                goals.len(),
                period,
                category
            );
        }
        Ok(goals.into_iter().next())
    }

    /// Whether adding `new_amount` keeps the month within its goal
    ///
    /// Spending is summed over every expense the owner has in the month, all
    /// categories included, and compared with the `(period, category)` goal.
    /// No goal means `Ok(false)`. The result is advisory; callers still
    /// write the expense.
    pub fn budget_limit_check(
        &self,
        owner: &OwnerId,
        period: &MonthPeriod,
        category: &str,
        new_amount: Money,
    ) -> TrackerResult<bool> {
        let lookup_failed = |e: TrackerError| {
            log::error!("Error checking budget limit: {}", e);
            TrackerError::Lookup("Failed to check budget limit.".into())
        };

        let Some(goal) = self.goal_for(owner, period, category).map_err(lookup_failed)? else {
            log::debug!("no budget goal for {} {}", period, category);
            return Ok(false);
        };

        let spent: Money = self
            .backend
            .expenses_in_range(owner, period.first_day(), period.last_day())
            .map_err(lookup_failed)?
            .iter()
            .map(|e| e.amount)
            .sum();

        log::debug!(
            "budget {} {}: goal {}, spent {}, adding {}",
            period,
            category,
            goal.goal_amount,
            spent,
            new_amount
        );
        Ok(goal.goal_amount >= spent + new_amount)
    }

    /// Set the goal for `(period, category)`, updating the first existing one
    /// or creating it
    pub fn set_goal(
        &self,
        session: &Session,
        period: MonthPeriod,
        category: &str,
        amount: Money,
    ) -> TrackerResult<BudgetGoal> {
        let owner = session.owner_id();
        let category = category.trim();

        let existing = self.goal_for(owner, &period, category).map_err(|e| {
            log::error!("Error loading budget goals: {}", e);
            TrackerError::Lookup("Failed to load budget goals.".into())
        })?;

        let save_failed = |e: TrackerError| {
            log::error!("Error saving budget goal: {}", e);
            TrackerError::Write("Failed to save budget goal.".into())
        };

        match existing {
            Some(mut goal) => {
                goal.set_goal_amount(amount);
                validate(&goal)?;
                if !self.backend.update_goal(goal.clone()).map_err(save_failed)? {
                    return Err(TrackerError::goal_not_found(goal.id.to_string()));
                }
                Ok(goal)
            }
            None => {
                let goal = BudgetGoal::new(owner.clone(), period, category, amount);
                validate(&goal)?;
                self.backend.insert_goal(goal.clone()).map_err(save_failed)?;
                Ok(goal)
            }
        }
    }

    /// The session owner's goals, optionally limited to one month; ordered by
    /// month, then category
    pub fn list_goals(
        &self,
        session: &Session,
        period: Option<MonthPeriod>,
    ) -> TrackerResult<Vec<BudgetGoal>> {
        let mut goals = self
            .backend
            .goals_for_owner(session.owner_id())
            .map_err(|e| {
                log::error!("Error loading budget goals: {}", e);
                TrackerError::Lookup("Failed to load budget goals.".into())
            })?;

        if let Some(period) = period {
            goals.retain(|g| g.period() == Some(period));
        }
        goals.sort_by(|a, b| {
            (a.year, a.month, &a.category).cmp(&(b.year, b.month, &b.category))
        });
        Ok(goals)
    }

    /// Find one of the owner's goals by full id or short prefix
    pub fn resolve_goal_id(&self, session: &Session, reference: &str) -> TrackerResult<BudgetGoalId> {
        let matches: Vec<_> = self
            .list_goals(session, None)?
            .into_iter()
            .filter(|g| g.id.matches_reference(reference))
            .collect();

        match matches.as_slice() {
            [goal] => Ok(goal.id),
            [] => Err(TrackerError::goal_not_found(reference)),
            _ => Err(TrackerError::Validation(format!(
                "'{}' matches {} budget goals; use a longer id",
                reference,
                matches.len()
            ))),
        }
    }

    pub fn delete_goal(&self, session: &Session, id: BudgetGoalId) -> TrackerResult<()> {
        let deleted = self
            .backend
            .delete_goal(session.owner_id(), id)
            .map_err(|e| {
                log::error!("Error deleting budget goal: {}", e);
                TrackerError::Write("Failed to delete budget goal.".into())
            })?;

        if !deleted {
            return Err(TrackerError::goal_not_found(id.to_string()));
        }
        Ok(())
    }
}

fn validate(goal: &BudgetGoal) -> TrackerResult<()> {
    goal.validate()
        .map_err(|e| TrackerError::Validation(e.to_string()))
}

/// Treat a failed budget lookup as `false`, logging a warning
pub fn collapse_lookup_failure(result: TrackerResult<bool>) -> bool {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("budget lookup failed, treating as false: {}", e);
            false
        }
    }
}
