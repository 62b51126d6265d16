//! Spending aggregation
//!
//! Pure functions that derive the dashboard's views from a snapshot of one
//! owner's expenses (and budget goals, for the comparison view). The caller
//! is responsible for owner scoping; nothing here filters by owner or
//! touches storage.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{BudgetGoal, Expense, Money, MonthPeriod};

/// Weekday labels in bucket order
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Category total with its share of all spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// 0.0 to 100.0
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// "MMM YYYY", e.g. "Jan 2025"
    pub label: String,
    pub period: MonthPeriod,
    pub total: Money,
}

/// One bar of the spending-over-time chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingPoint {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Budget versus actual spending for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetComparisonRow {
    pub category: String,
    /// Zero when the category has no goal
    pub budget: Money,
    pub actual: Money,
}

impl BudgetComparisonRow {
    pub fn is_over_budget(&self) -> bool {
        self.actual > self.budget
    }

    pub fn remaining(&self) -> Money {
        self.budget - self.actual
    }
}

/// Spending per day of week, always all seven buckets from Sunday to Saturday
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayDistribution {
    buckets: [Money; WeekdayDistribution::BUCKETS],
}

impl WeekdayDistribution {
    pub const BUCKETS: usize = 7;

    /// Total for a weekday label such as "Mon"
    pub fn get(&self, label: &str) -> Option<Money> {
        WEEKDAY_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| self.buckets[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Money)> + '_ {
        WEEKDAY_LABELS.iter().copied().zip(self.buckets.iter().copied())
    }

    pub fn total(&self) -> Money {
        self.buckets.iter().sum()
    }
}

impl Serialize for WeekdayDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Self::BUCKETS))?;
        for (label, total) in self.iter() {
            map.serialize_entry(label, &total)?;
        }
        map.end()
    }
}

/// Sum of amounts per category; categories without expenses are absent
pub fn group_by_category(expenses: &[Expense]) -> BTreeMap<String, Money> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry(expense.category.clone())
            .or_insert_with(Money::zero) += expense.amount;
    }
    totals
}

/// Ascending by date; same-date expenses keep their input order
pub fn sort_by_date(expenses: &[Expense]) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by_key(|e| e.date);
    sorted
}

/// Totals per calendar month, in the order each month first appears in the input
///
/// Feed it [`sort_by_date`] output for a chronological series.
pub fn monthly_series(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut series: Vec<MonthlyTotal> = Vec::new();
    let mut index: HashMap<MonthPeriod, usize> = HashMap::new();

    for expense in expenses {
        let period = expense.period();
        match index.get(&period) {
            Some(&i) => series[i].total += expense.amount,
            None => {
                index.insert(period, series.len());
                series.push(MonthlyTotal {
                    label: period.label(),
                    period,
                    total: expense.amount,
                });
            }
        }
    }

    series
}

/// The `n` highest-spending categories, ties broken by name ascending
pub fn top_categories(expenses: &[Expense], n: usize) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = group_by_category(expenses)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();

    // Stable sort over name-ordered input keeps the name tie-break
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(n);
    totals
}

pub fn weekday_distribution(expenses: &[Expense]) -> WeekdayDistribution {
    let mut distribution = WeekdayDistribution::default();
    for expense in expenses {
        let day = expense.weekday().num_days_from_sunday() as usize;
        distribution.buckets[day] += expense.amount;
    }
    distribution
}

/// One row per expense category, in first-appearance order
///
/// Goals are matched on category alone, whatever month they belong to; the
/// first matching goal is used.
pub fn budget_comparison(expenses: &[Expense], goals: &[BudgetGoal]) -> Vec<BudgetComparisonRow> {
    let mut rows: Vec<BudgetComparisonRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match index.get(expense.category.as_str()) {
            Some(&i) => rows[i].actual += expense.amount,
            None => {
                let budget = goals
                    .iter()
                    .find(|g| g.category == expense.category)
                    .map(|g| g.goal_amount)
                    .unwrap_or_default();
                index.insert(expense.category.as_str(), rows.len());
                rows.push(BudgetComparisonRow {
                    category: expense.category.clone(),
                    budget,
                    actual: expense.amount,
                });
            }
        }
    }

    rows
}

/// [`group_by_category`] with each category's percentage of total spending
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
    let totals = group_by_category(expenses);
    let grand_total: Money = totals.values().sum();

    totals
        .into_iter()
        .map(|(category, total)| {
            let percent = if grand_total.is_zero() {
                0.0
            } else {
                total.cents() as f64 / grand_total.cents() as f64 * 100.0
            };
            CategoryShare {
                category,
                total,
                percent,
            }
        })
        .collect()
}

/// One point per expense in date order
pub fn spending_over_time(expenses: &[Expense]) -> Vec<SpendingPoint> {
    sort_by_date(expenses)
        .into_iter()
        .map(|e| SpendingPoint {
            date: e.date,
            amount: e.amount,
        })
        .collect()
}
