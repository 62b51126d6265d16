//! Expense model
//!
//! A single spending event recorded by one owner.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, OwnerId};
use super::money::Money;
use super::period::MonthPeriod;

/// Categories offered by the expense form. The set is open: any non-empty
/// tag is accepted.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Food", "Transport", "Entertainment", "Other"];

/// A spending event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// The user who recorded this expense
    pub owner_id: OwnerId,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub amount: Money,

    pub category: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        owner_id: OwnerId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            owner_id,
            date,
            description: description.into(),
            amount,
            category: category.into().trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The calendar month this expense counts against
    pub fn period(&self) -> MonthPeriod {
        MonthPeriod::from_date(self.date)
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Replace the editable fields, keeping id, owner and creation time
    pub fn apply_edit(
        &mut self,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) {
        self.date = date;
        self.description = description.into();
        self.amount = amount;
        self.category = category.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount(Money),
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::NegativeAmount(amount) => write!(f, "Amount cannot be negative: {}", amount),
            Self::EmptyCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
