//! The stored session token, kept in `session.json`

use std::fs;
use std::path::PathBuf;

use crate::error::{TrackerError, TrackerResult};

use super::Session;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored token, if any
    pub fn load(&self) -> TrackerResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let token = fs::read_to_string(&self.path)
            .map_err(|e| TrackerError::Io(format!("Failed to read session file: {}", e)))?;
        let token = token.trim();

        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn save(&self, session: &Session) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, session.to_token())
            .map_err(|e| TrackerError::Io(format!("Failed to write session file: {}", e)))
    }

    /// Remove the stored token; returns whether one existed
    pub fn clear(&self) -> TrackerResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .map_err(|e| TrackerError::Io(format!("Failed to remove session file: {}", e)))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerId;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), None);

        store.save(&Session::new(OwnerId::new("u1"))).unwrap();
        let token = store.load().unwrap().unwrap();
        assert_eq!(Session::from_token(&token).unwrap().owner_id().as_str(), "u1");

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_blank_file_is_no_token() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "\n").unwrap();

        assert_eq!(SessionStore::new(path).load().unwrap(), None);
    }
}
