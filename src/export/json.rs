//! JSON export of one owner's data, with schema versioning

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetGoal, Expense, Money, OwnerId};
use crate::session::Session;
use crate::storage::Backend;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the tool that wrote the export
    pub app_version: String,

    pub owner_id: OwnerId,

    /// Newest first
    pub expenses: Vec<Expense>,

    pub budget_goals: Vec<BudgetGoal>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub goal_count: usize,
    pub total_spent: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    /// Collect the session owner's expenses and goals
    pub fn collect(backend: &dyn Backend, session: &Session) -> TrackerResult<Self> {
        let owner = session.owner_id();
        let expenses = backend.expenses_for_owner(owner).map_err(|e| {
            log::error!("Error fetching expenses for export: {}", e);
            TrackerError::Lookup("Failed to load expenses.".into())
        })?;
        let budget_goals = backend.goals_for_owner(owner).map_err(|e| {
            log::error!("Error fetching budget goals for export: {}", e);
            TrackerError::Lookup("Failed to load budget goals.".into())
        })?;

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            goal_count: budget_goals.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.iter().map(|e| e.date).min(),
            latest_expense: expenses.iter().map(|e| e.date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            owner_id: owner.clone(),
            expenses,
            budget_goals,
            metadata,
        })
    }
}

pub fn export_full_json<W: Write>(
    backend: &dyn Backend,
    session: &Session,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let export = FullExport::collect(backend, session)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthPeriod;
    use crate::services::testing::test_storage;

    #[test]
    fn test_export_is_owner_scoped() {
        let (_dir, storage) = test_storage();
        let me = Session::new(OwnerId::new("me"));
        for (owner, day, dollars) in [("me", 10, 10), ("me", 15, 15), ("them", 2, 99)] {
            storage
                .insert_expense(Expense::new(
                    OwnerId::new(owner),
                    NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
                    "x",
                    Money::from_units(dollars),
                    "Food",
                ))
                .unwrap();
        }
        storage
            .insert_goal(BudgetGoal::new(
                OwnerId::new("me"),
                MonthPeriod::new(2025, 5).unwrap(),
                "Food",
                Money::from_units(100),
            ))
            .unwrap();

        let export = FullExport::collect(&storage, &me).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.goal_count, 1);
        assert_eq!(export.metadata.total_spent, Money::from_units(25));
        assert_eq!(
            export.metadata.earliest_expense,
            NaiveDate::from_ymd_opt(2025, 5, 10)
        );
    }

    #[test]
    fn test_json_output_parses_back() {
        let (_dir, storage) = test_storage();
        let session = Session::new(OwnerId::new("me"));

        let mut output = Vec::new();
        export_full_json(&storage, &session, &mut output, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.owner_id.as_str(), "me");
        assert!(parsed.expenses.is_empty());
    }
}
