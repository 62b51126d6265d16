//! Audit trail of expense and budget goal writes
//!
//! Every create, update and delete performed through [`crate::storage::Storage`]
//! appends an [`AuditEntry`] to `audit.log` as one JSON line, with before and
//! after snapshots of the row.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
