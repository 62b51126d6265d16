//! Expense service
//!
//! Owner-scoped expense CRUD. Adding or editing an expense first checks the
//! month's budget goal for the category: a missing goal blocks the write
//! (unless configured otherwise), while going over the goal only produces a
//! warning.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::services::BudgetService;
use crate::session::Session;
use crate::storage::Backend;

/// Form fields for adding or editing an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: String,
}

impl ExpenseInput {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: category.into(),
        }
    }

    /// Prefill from an existing expense, for partial edits
    pub fn from_expense(expense: &Expense) -> Self {
        Self::new(
            expense.date,
            expense.description.clone(),
            expense.amount,
            expense.category.clone(),
        )
    }
}

/// Non-blocking outcome of the budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetWarning {
    /// The month's spending would go over the goal
    ExceedsBudget,
    /// The limit could not be checked
    CheckFailed,
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExceedsBudget => write!(
                f,
                "Warning: This expense exceeds the budget for this month, but it will be added."
            ),
            Self::CheckFailed => write!(f, "Failed to check budget limit."),
        }
    }
}

/// A saved expense and any budget warning raised while saving it
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub expense: Expense,
    pub warning: Option<BudgetWarning>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    backend: &'a dyn Backend,
    require_budget_goal: bool,
}

impl<'a> ExpenseService<'a> {
    pub fn new(backend: &'a dyn Backend, require_budget_goal: bool) -> Self {
        Self {
            backend,
            require_budget_goal,
        }
    }

    /// The session owner's expenses, newest first
    pub fn list(&self, session: &Session) -> TrackerResult<Vec<Expense>> {
        self.backend
            .expenses_for_owner(session.owner_id())
            .map_err(|e| {
                log::error!("Error fetching expenses: {}", e);
                TrackerError::Lookup("Failed to load expenses.".into())
            })
    }

    pub fn get(&self, session: &Session, id: ExpenseId) -> TrackerResult<Expense> {
        self.backend
            .get_expense(session.owner_id(), id)
            .map_err(|e| {
                log::error!("Error fetching expense {}: {}", id, e);
                TrackerError::Lookup("Failed to load expenses.".into())
            })?
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }

    /// Find one of the owner's expenses by full id or short prefix
    pub fn resolve_id(&self, session: &Session, reference: &str) -> TrackerResult<ExpenseId> {
        let matches: Vec<_> = self
            .list(session)?
            .into_iter()
            .filter(|e| e.id.matches_reference(reference))
            .map(|e| e.id)
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(TrackerError::expense_not_found(reference)),
            _ => Err(TrackerError::Validation(format!(
                "'{}' matches {} expenses; use a longer id",
                reference,
                matches.len()
            ))),
        }
    }

    /// Add a new expense, or replace the fields of `editing`
    ///
    /// # Errors
    ///
    /// - `Budget` when no goal exists for the month and category and goals are required
    /// - `Lookup` when the goal lookup fails
    /// - `Validation` for an empty description or category, or a negative amount
    /// - `NotFound` when `editing` is not one of the owner's expenses
    /// - `Write` when the backend rejects the write
    ///
    /// An edit is checked net of the row's previous amount when it stays in
    /// the same month.
    pub fn submit(
        &self,
        session: &Session,
        input: ExpenseInput,
        editing: Option<ExpenseId>,
    ) -> TrackerResult<SubmitOutcome> {
        let owner = session.owner_id();

        let existing = match editing {
            Some(id) => Some(self.get(session, id)?),
            None => None,
        };

        let expense = match &existing {
            Some(current) => {
                let mut updated = current.clone();
                updated.apply_edit(input.date, input.description, input.amount, input.category);
                updated
            }
            None => Expense::new(
                owner.clone(),
                input.date,
                input.description,
                input.amount,
                input.category,
            ),
        };
        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let period = expense.period();
        let budgets = BudgetService::new(self.backend);

        let has_goal = budgets.budget_exists(owner, &period, &expense.category)?;
        if !has_goal && self.require_budget_goal {
            return Err(TrackerError::Budget("No budget set for this month.".into()));
        }

        let warning = if has_goal {
            // An edited row is already in the month's total with its old amount
            let already_counted = existing
                .as_ref()
                .filter(|e| e.period() == period)
                .map(|e| e.amount)
                .unwrap_or_default();

            match budgets.budget_limit_check(
                owner,
                &period,
                &expense.category,
                expense.amount - already_counted,
            ) {
                Ok(true) => None,
                Ok(false) => Some(BudgetWarning::ExceedsBudget),
                Err(_) => Some(BudgetWarning::CheckFailed),
            }
        } else {
            None
        };

        if let Some(warning) = warning {
            log::warn!("{} {}: {}", period, expense.category, warning);
        }

        if existing.is_some() {
            let updated = self.backend.update_expense(expense.clone()).map_err(|e| {
                log::error!("Error updating expense: {}", e);
                TrackerError::Write("Failed to update expense.".into())
            })?;
            if !updated {
                return Err(TrackerError::expense_not_found(expense.id.to_string()));
            }
        } else {
            self.backend.insert_expense(expense.clone()).map_err(|e| {
                log::error!("Error adding expense: {}", e);
                TrackerError::Write("Failed to add expense.".into())
            })?;
        }

        Ok(SubmitOutcome { expense, warning })
    }

    pub fn delete(&self, session: &Session, id: ExpenseId) -> TrackerResult<()> {
        let deleted = self
            .backend
            .delete_expense(session.owner_id(), id)
            .map_err(|e| {
                log::error!("Error deleting expense: {}", e);
                TrackerError::Write("Failed to delete expense.".into())
            })?;

        if !deleted {
            return Err(TrackerError::expense_not_found(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthPeriod, OwnerId};
    use crate::services::testing::{test_storage, FailingBackend};

    fn session() -> Session {
        Session::new(OwnerId::new("user-1"))
    }

    fn march() -> MonthPeriod {
        MonthPeriod::new(2025, 3).unwrap()
    }

    fn food(day: u32, dollars: i64) -> ExpenseInput {
        ExpenseInput::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            "Groceries",
            Money::from_units(dollars),
            "Food",
        )
    }

    fn with_food_goal(storage: &dyn Backend, dollars: i64) {
        BudgetService::new(storage)
            .set_goal(&session(), march(), "Food", Money::from_units(dollars))
            .unwrap();
    }

    #[test]
    fn test_missing_goal_blocks_by_default() {
        let (_dir, storage) = test_storage();
        let service = ExpenseService::new(&storage, true);

        let err = service.submit(&session(), food(1, 10), None).unwrap_err();
        assert_eq!(err.to_string(), "No budget set for this month.");
        assert!(service.list(&session()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_goal_allowed_when_not_required() {
        let (_dir, storage) = test_storage();
        let service = ExpenseService::new(&storage, false);

        let outcome = service.submit(&session(), food(1, 10), None).unwrap();
        assert_eq!(outcome.warning, None);
        assert_eq!(service.list(&session()).unwrap().len(), 1);
    }

    #[test]
    fn test_padded_category_finds_trimmed_goal() {
        let (_dir, storage) = test_storage();
        BudgetService::new(&storage)
            .set_goal(&session(), march(), " Food ", Money::from_units(100))
            .unwrap();
        let service = ExpenseService::new(&storage, true);

        let input = ExpenseInput::new(
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            "x",
            Money::from_units(1),
            " Food ",
        );
        let outcome = service.submit(&session(), input, None).unwrap();
        assert_eq!(outcome.warning, None);
        assert_eq!(outcome.expense.category, "Food");
    }

    #[test]
    fn test_over_budget_warns_but_writes() {
        let (_dir, storage) = test_storage();
        with_food_goal(&storage, 500);
        let service = ExpenseService::new(&storage, true);

        let first = service.submit(&session(), food(2, 450), None).unwrap();
        assert_eq!(first.warning, None);

        let within = service.submit(&session(), food(3, 40), None).unwrap();
        assert_eq!(within.warning, None);

        let over = service.submit(&session(), food(4, 60), None).unwrap();
        assert_eq!(over.warning, Some(BudgetWarning::ExceedsBudget));
        assert_eq!(service.list(&session()).unwrap().len(), 3);
    }

    #[test]
    fn test_edit_does_not_count_old_amount_twice() {
        let (_dir, storage) = test_storage();
        with_food_goal(&storage, 100);
        let service = ExpenseService::new(&storage, true);

        let saved = service.submit(&session(), food(2, 90), None).unwrap().expense;
        let edited = service
            .submit(&session(), food(2, 95), Some(saved.id))
            .unwrap();

        assert_eq!(edited.warning, None);
        assert_eq!(edited.expense.id, saved.id);
        assert_eq!(edited.expense.created_at, saved.created_at);
        let all = service.list(&session()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, Money::from_units(95));
    }

    #[test]
    fn test_validation_runs_before_writes() {
        let (_dir, storage) = test_storage();
        with_food_goal(&storage, 100);
        let service = ExpenseService::new(&storage, true);

        let mut input = food(1, 5);
        input.description = "   ".into();
        assert!(matches!(
            service.submit(&session(), input, None),
            Err(TrackerError::Validation(_))
        ));

        let mut input = food(1, 5);
        input.amount = Money::from_cents(-500);
        assert!(matches!(
            service.submit(&session(), input, None),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn test_cannot_edit_or_delete_foreign_expense() {
        let (_dir, storage) = test_storage();
        with_food_goal(&storage, 100);
        let service = ExpenseService::new(&storage, true);
        let saved = service.submit(&session(), food(1, 5), None).unwrap().expense;

        let intruder = Session::new(OwnerId::new("user-2"));
        assert!(service
            .submit(&intruder, food(1, 1), Some(saved.id))
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(&intruder, saved.id).unwrap_err().is_not_found());
        assert!(service.list(&intruder).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_and_delete() {
        let (_dir, storage) = test_storage();
        with_food_goal(&storage, 100);
        let service = ExpenseService::new(&storage, true);
        let saved = service.submit(&session(), food(1, 5), None).unwrap().expense;

        let id = service.resolve_id(&session(), &saved.id.short()).unwrap();
        assert_eq!(id, saved.id);
        service.delete(&session(), id).unwrap();
        assert!(service.resolve_id(&session(), &saved.id.short()).is_err());
    }

    #[test]
    fn test_backend_failures_have_short_messages() {
        let backend = FailingBackend;
        let service = ExpenseService::new(&backend, true);

        assert_eq!(
            service.list(&session()).unwrap_err().to_string(),
            "Failed to load expenses."
        );
        assert_eq!(
            service.submit(&session(), food(1, 5), None).unwrap_err().to_string(),
            "Failed to check budget."
        );
        assert_eq!(
            service.delete(&session(), ExpenseId::new()).unwrap_err().to_string(),
            "Failed to delete expense."
        );
    }

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            BudgetWarning::ExceedsBudget.to_string(),
            "Warning: This expense exceeds the budget for this month, but it will be added."
        );
        assert_eq!(BudgetWarning::CheckFailed.to_string(), "Failed to check budget limit.");
    }
}
