//! JSON file-based session store.
//!
//! The whole record is rewritten on every save using an atomic write
//! (write-to-temp + rename), so a crash never leaves a half-written session.

use crate::domain::error::{JobBoardError, Result};
use crate::storage::backend::SessionStore;
use crate::storage::models::SessionRecord;
use std::path::{Path, PathBuf};

/// File name of the session store inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// JSON file session store.
///
/// Nothing is cached in memory; [`SessionContext`](crate::storage::SessionContext)
/// reads the file once at startup and holds the parsed state.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonSessionStore {
    /// Opens a JSON session store, creating parent directories as needed.
    ///
    /// The file itself is created lazily on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Opens `session.json` inside `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(SESSION_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<SessionRecord> {
        let _span = tracing::debug_span!("session_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no session file, starting logged out");
            return Ok(SessionRecord::default());
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let record: SessionRecord = serde_json::from_str(&contents)
            .map_err(|e| JobBoardError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(complete = record.is_complete(), "loaded session file");
        Ok(record)
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        let _span = tracing::debug_span!("session_save", path = ?self.file_path).entered();

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| JobBoardError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _span = tracing::debug_span!("session_clear", path = ?self.file_path).entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => {
                tracing::debug!("session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            token: Some("abc".into()),
            user: Some(r#"{"id":1}"#.into()),
            user_type: Some("company".into()),
        }
    }

    #[test]
    fn missing_file_loads_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_writes_three_named_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        store.save(&record()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["token"], "abc");
        assert_eq!(raw["userType"], "company");
        assert!(raw["user"].is_string());
        assert!(!store.path().with_extension("tmp").exists());

        assert_eq!(store.load().unwrap(), record());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        store.save(&record()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupted_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(JobBoardError::Storage(_))));
    }
}
