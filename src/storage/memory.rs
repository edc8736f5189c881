//! In-process session store.

use crate::domain::error::Result;
use crate::storage::backend::SessionStore;
use crate::storage::models::SessionRecord;
use std::sync::{Mutex, PoisonError};

/// Keeps the session record in memory only.
///
/// Used by tests and when the data directory is unavailable.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<SessionRecord>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `record`.
    #[must_use]
    pub fn with_record(record: SessionRecord) -> Self {
        Self { record: Mutex::new(record) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<SessionRecord> {
        Ok(self.record.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = record.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = SessionRecord::default();
        Ok(())
    }
}
