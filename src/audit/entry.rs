//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::OwnerId;

/// Kind of write recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Record collections that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Expense,
    BudgetGoal,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::BudgetGoal => write!(f, "BudgetGoal"),
        }
    }
}

/// One line of the audit log
///
/// `before` is set for updates and deletes, `after` for creates and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Owner of the affected row
    pub owner_id: OwnerId,

    /// Short label for listings, e.g. the expense description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn blank(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        owner_id: OwnerId,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            owner_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner_id: OwnerId,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::blank(
            Operation::Create,
            entity_type,
            entity_id.into(),
            owner_id,
            entity_name,
        );
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Update entry with both snapshots and a field-level diff
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner_id: OwnerId,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let mut entry = Self::blank(
            Operation::Update,
            entity_type,
            entity_id.into(),
            owner_id,
            entity_name,
        );
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry.diff_summary = match (&entry.before, &entry.after) {
            (Some(b), Some(a)) => super::diff::generate_diff(b, a),
            _ => None,
        };
        entry
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner_id: OwnerId,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::blank(
            Operation::Delete,
            entity_type,
            entity_id.into(),
            owner_id,
            entity_name,
        );
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owner() -> OwnerId {
        OwnerId::new("user-1")
    }

    #[test]
    fn test_create_entry_has_only_after() {
        let entry = AuditEntry::create(
            EntityType::Expense,
            "exp-12345678",
            owner(),
            Some("Lunch".to_string()),
            &json!({"description": "Lunch", "amount": 1250}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_update_entry_computes_diff() {
        let entry = AuditEntry::update(
            EntityType::BudgetGoal,
            "bud-12345678",
            owner(),
            None,
            &json!({"category": "Food", "goal_amount": 50000}),
            &json!({"category": "Food", "goal_amount": 60000}),
        );

        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("goal_amount: 50000 -> 60000")
        );
    }

    #[test]
    fn test_delete_entry_has_only_before() {
        let entry = AuditEntry::delete(
            EntityType::Expense,
            "exp-12345678",
            owner(),
            None,
            &json!({"description": "Lunch"}),
        );

        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let entry = AuditEntry::create(EntityType::BudgetGoal, "bud-1", owner(), None, &json!({}));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["operation"], "create");
        assert_eq!(value["entity_type"], "budget_goal");
        assert_eq!(value["owner_id"], "user-1");
        assert!(value.get("entity_name").is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Expense,
            "exp-12345678",
            owner(),
            Some("Lunch".to_string()),
            &json!({}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Expense exp-12345678 (Lunch)"));
    }
}
