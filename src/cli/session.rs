//! Sign-in state commands

use crate::error::{TrackerError, TrackerResult};
use crate::models::OwnerId;
use crate::routes::{RouteDecision, RouteGuard};
use crate::session::{Session, SessionStore};

/// Record a session for `owner`
///
/// A signed-in user visiting `/login` is bounced to the dashboard, so an
/// existing session is kept unless `force` is set.
pub fn handle_login(
    store: &SessionStore,
    guard: &RouteGuard,
    current: Option<&Session>,
    owner: &str,
    email: Option<String>,
    force: bool,
) -> TrackerResult<()> {
    if let (Some(session), false) = (current, force) {
        if let RouteDecision::RedirectToDashboard(target) = guard.evaluate("/login", true) {
            println!(
                "Already signed in as {}; continuing to {}. Use --force to switch users.",
                session.owner_id(),
                target
            );
            return Ok(());
        }
    }

    let owner = owner.trim();
    if owner.is_empty() {
        return Err(TrackerError::Validation("Owner id is required".into()));
    }

    let mut session = Session::new(OwnerId::new(owner));
    if let Some(email) = email {
        session = session.with_email(email);
    }
    store.save(&session)?;
    log::info!("session stored for {}", owner);

    println!("Signed in as {}", owner);
    Ok(())
}

pub fn handle_logout(store: &SessionStore) -> TrackerResult<()> {
    if store.clear()? {
        println!("Signed out.");
    } else {
        println!("No session to sign out of.");
    }
    Ok(())
}

pub fn handle_whoami(session: &Session) -> TrackerResult<()> {
    match session.email() {
        Some(email) => println!("{} <{}>", session.owner_id(), email),
        None => println!("{}", session.owner_id()),
    }
    Ok(())
}

/// Print the guard's decision for `path`
pub fn handle_route(guard: &RouteGuard, path: &str, has_session: bool) -> TrackerResult<()> {
    println!("{}: {}", path, guard.evaluate(path, has_session));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_login_keeps_existing_session_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        let guard = RouteGuard::default();

        handle_login(&store, &guard, None, "alice", None, false).unwrap();
        let alice = Session::from_token(&store.load().unwrap().unwrap()).unwrap();

        handle_login(&store, &guard, Some(&alice), "bob", None, false).unwrap();
        let still = Session::from_token(&store.load().unwrap().unwrap()).unwrap();
        assert_eq!(still.owner_id().as_str(), "alice");

        handle_login(&store, &guard, Some(&alice), "bob", None, true).unwrap();
        let switched = Session::from_token(&store.load().unwrap().unwrap()).unwrap();
        assert_eq!(switched.owner_id().as_str(), "bob");
    }

    #[test]
    fn test_login_requires_owner() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        let result = handle_login(&store, &RouteGuard::default(), None, "  ", None, false);
        assert!(matches!(result, Err(TrackerError::Validation(_))));
    }
}
