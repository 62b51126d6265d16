//! Audit history CLI command

use crate::error::TrackerResult;
use crate::session::Session;
use crate::storage::Storage;

/// Print the session owner's most recent writes, oldest first
pub fn handle_history_command(storage: &Storage, session: &Session, limit: usize) -> TrackerResult<()> {
    let entries = storage.audit().read_recent(session.owner_id(), limit)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
