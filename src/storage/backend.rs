//! Session store abstraction.
//!
//! The trait is deliberately small: the session is written as a whole on login
//! and removed as a whole on logout or expiry.

use crate::domain::error::Result;
use crate::storage::models::SessionRecord;

/// Abstraction over persistent session backends.
///
/// # Implementations
///
/// - [`JsonSessionStore`](crate::storage::JsonSessionStore): `session.json` with atomic writes (default)
/// - [`MemorySessionStore`](crate::storage::MemorySessionStore): nothing touches disk
///
/// # Examples
///
/// ```no_run
/// use jobboard::storage::{JsonSessionStore, SessionStore};
///
/// let store = JsonSessionStore::new("/tmp/jobboard/session.json".into())?;
/// let record = store.load()?;
/// println!("token present: {}", record.token.is_some());
/// # Ok::<(), jobboard::JobBoardError>(())
/// ```
pub trait SessionStore: Send + Sync {
    /// Reads the persisted entries. A missing store yields an empty record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<SessionRecord>;

    /// Replaces every persisted entry with `record`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Removes every persisted entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear(&self) -> Result<()>;
}
