//! Session and identity
//!
//! The signed-in user is carried by a session token. One invocation resolves
//! the token once into a [`Session`], which is then passed to every service
//! call that needs an owner.
//!
//! Token resolution order:
//!
//! 1. `--session` (or `EXPENSE_TRACKER_SESSION`)
//! 2. the stored `session.json` written by `expense login`

mod store;
mod token;

pub use store::SessionStore;
pub use token::Session;

use thiserror::Error;

use crate::error::TrackerResult;

/// Environment variable holding a session token
pub const SESSION_ENV: &str = "EXPENSE_TRACKER_SESSION";

/// Why no usable session could be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No session found. Please log in.")]
    NoSession,

    #[error("Invalid session data.")]
    InvalidSession,

    #[error("User is not authenticated.")]
    Unauthenticated,
}

/// Pick the token for this invocation: an explicit token wins over the stored one
pub fn resolve_token(explicit: Option<&str>, store: &SessionStore) -> TrackerResult<Option<String>> {
    match explicit.map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => Ok(Some(token.to_string())),
        None => store.load(),
    }
}

/// Resolve and parse the session, failing when there is none
pub fn require_session(token: Option<&str>) -> Result<Session, SessionError> {
    match token {
        Some(token) => Session::from_token(token),
        None => Err(SessionError::NoSession),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerId;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_token_wins() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        store.save(&Session::new(OwnerId::new("stored"))).unwrap();

        let token = resolve_token(Some(r#"{"user":{"id":"flag"}}"#), &store).unwrap();
        assert_eq!(
            require_session(token.as_deref()).unwrap().owner_id().as_str(),
            "flag"
        );

        let token = resolve_token(Some(""), &store).unwrap();
        assert_eq!(
            require_session(token.as_deref()).unwrap().owner_id().as_str(),
            "stored"
        );
    }

    #[test]
    fn test_no_token_is_no_session() {
        assert_eq!(require_session(None), Err(SessionError::NoSession));
    }
}
