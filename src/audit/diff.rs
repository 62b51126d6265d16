//! Field-level diffs between two JSON snapshots

use serde_json::Value;

/// Summarise top-level field changes as `field: old -> new`, comma separated
///
/// Returns `None` when nothing changed. The `updated_at` bookkeeping field
/// is ignored since it changes on every edit.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if key == "updated_at" {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"description": "Lunch", "amount": 1250, "category": "Food"});
        let after = json!({"description": "Lunch", "amount": 1500, "category": "Other"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("amount: 1250 -> 1500"));
        assert!(diff.contains("category: \"Food\" -> \"Other\""));
        assert!(!diff.contains("description"));
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"amount": 1, "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"amount": 1, "updated_at": "2025-02-01T00:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let diff = generate_diff(&json!({"old": true}), &json!({"new": 3})).unwrap();
        assert!(diff.contains("old: true -> (removed)"));
        assert!(diff.contains("new: (added) -> 3"));
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let before = json!({"description": "é".repeat(60)});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
