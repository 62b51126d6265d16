//! Strongly-typed identifiers
//!
//! Record ids are UUID newtypes generated locally. Owner ids come from the
//! identity provider and are opaque strings, so they get their own wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a UUID-backed id newtype with a short display prefix
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form shown to users, e.g. `exp-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Whether a user-typed reference (full UUID or short form) names this id
            pub fn matches_reference(&self, reference: &str) -> bool {
                let reference = reference.trim();
                if let Ok(uuid) = Uuid::parse_str(reference) {
                    return uuid == self.0;
                }
                let bare = reference.strip_prefix($display_prefix).unwrap_or(reference);
                !bare.is_empty() && self.0.simple().to_string().starts_with(&bare.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(BudgetGoalId, "bud-");

/// Identifier of the user who owns a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_display() {
        let id = ExpenseId::new();
        let display = id.to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_matches_reference() {
        let id = ExpenseId::new();
        assert!(id.matches_reference(&id.as_uuid().to_string()));
        assert!(id.matches_reference(&id.short()));
        assert!(id.matches_reference(&id.short()[4..]));
        assert!(!id.matches_reference(""));
        assert!(!id.matches_reference("exp-"));
        assert!(!ExpenseId::new().matches_reference(&id.as_uuid().to_string()));
    }

    #[test]
    fn test_parse_full_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: BudgetGoalId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
        assert_eq!(id.to_string(), "bud-550e8400");
    }

    #[test]
    fn test_owner_id_serializes_as_string() {
        let owner = OwnerId::new("user-42");
        assert_eq!(serde_json::to_string(&owner).unwrap(), "\"user-42\"");
    }
}
