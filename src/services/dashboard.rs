//! Dashboard service
//!
//! Loads one owner's expenses and goals and derives every dashboard view
//! from them in one pass through the aggregation functions.

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetGoal, Expense, Money};
use crate::services::aggregation::{
    self, BudgetComparisonRow, CategoryShare, CategoryTotal, MonthlyTotal, SpendingPoint,
    WeekdayDistribution,
};
use crate::session::Session;
use crate::storage::Backend;

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub expense_count: usize,
    pub total_spent: Money,
    pub by_category: Vec<CategoryShare>,
    pub spending_over_time: Vec<SpendingPoint>,
    /// Chronological: built from date-sorted expenses
    pub monthly: Vec<MonthlyTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub by_weekday: WeekdayDistribution,
    pub budget_vs_actual: Vec<BudgetComparisonRow>,
}

impl DashboardView {
    pub fn build(expenses: &[Expense], goals: &[BudgetGoal], top_n: usize) -> Self {
        let sorted = aggregation::sort_by_date(expenses);

        Self {
            expense_count: expenses.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            by_category: aggregation::category_breakdown(expenses),
            spending_over_time: aggregation::spending_over_time(expenses),
            monthly: aggregation::monthly_series(&sorted),
            top_categories: aggregation::top_categories(expenses, top_n),
            by_weekday: aggregation::weekday_distribution(expenses),
            budget_vs_actual: aggregation::budget_comparison(&sorted, goals),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }
}

pub struct DashboardService<'a> {
    backend: &'a dyn Backend,
    top_n: usize,
}

impl<'a> DashboardService<'a> {
    pub fn new(backend: &'a dyn Backend, top_n: usize) -> Self {
        Self { backend, top_n }
    }

    pub fn load(&self, session: &Session) -> TrackerResult<DashboardView> {
        let owner = session.owner_id();

        let expenses = self.backend.expenses_for_owner(owner).map_err(|e| {
            log::error!("Error fetching expenses: {}", e);
            TrackerError::Lookup("Failed to load expenses.".into())
        })?;
        let goals = self.backend.goals_for_owner(owner).map_err(|e| {
            log::error!("Error fetching budget goals: {}", e);
            TrackerError::Lookup("Failed to load budget goals.".into())
        })?;

        log::debug!(
            "building dashboard from {} expenses and {} goals",
            expenses.len(),
            goals.len()
        );
        Ok(DashboardView::build(&expenses, &goals, self.top_n))
    }
}
