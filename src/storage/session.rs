//! The in-memory session shared by the gateway and the CLI.
//!
//! [`SessionContext`] is rehydrated once at startup from a [`SessionStore`] and
//! passed explicitly to whoever needs credentials. Mutations write through to
//! the store so the persisted entries never drift from what requests use.

use crate::domain::error::Result;
use crate::domain::{Role, User};
use crate::storage::backend::SessionStore;
use crate::storage::memory::MemorySessionStore;
use crate::storage::models::SessionRecord;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
    role: Option<Role>,
}

/// Credentials and identity of the signed-in account, if any.
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    state: Mutex<SessionState>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SessionContext")
            .field("has_token", &state.token.is_some())
            .field("user", &state.user.as_ref().map(|u| u.email.as_str()))
            .field("role", &state.role)
            .finish()
    }
}

impl SessionContext {
    /// Restores the session from `store`.
    ///
    /// A stored token is used for requests even when the other entries are
    /// missing. The account counts as signed in only when all three entries are
    /// present and parse. Unreadable or malformed entries are logged and
    /// cleared; the context then starts logged out.
    #[must_use]
    pub fn rehydrate(store: Box<dyn SessionStore>) -> Self {
        let _span = tracing::debug_span!("session_rehydrate").entered();

        let state = match store.load() {
            Ok(record) => match Self::parse(&record) {
                Ok(state) => state,
                Err(reason) => {
                    tracing::warn!(error = %reason, "discarding malformed session");
                    Self::clear_store(store.as_ref());
                    SessionState::default()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable, starting logged out");
                Self::clear_store(store.as_ref());
                SessionState::default()
            }
        };

        tracing::debug!(authenticated = state.user.is_some(), "session rehydrated");
        Self { store, state: Mutex::new(state) }
    }

    /// A logged-out context that never touches disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::rehydrate(Box::new(MemorySessionStore::new()))
    }

    fn parse(record: &SessionRecord) -> std::result::Result<SessionState, String> {
        let token = record.token.clone();
        if !record.is_complete() {
            return Ok(SessionState { token, user: None, role: None });
        }

        let raw_user = record.user.as_deref().unwrap_or_default();
        let raw_role = record.user_type.as_deref().unwrap_or_default();
        let user: User = serde_json::from_str(raw_user).map_err(|e| format!("invalid user entry: {e}"))?;
        let role: Role = raw_role.parse()?;

        Ok(SessionState { token, user: Some(user), role: Some(role) })
    }

    fn clear_store(store: &dyn SessionStore) {
        if let Err(e) = store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bearer token to attach to requests.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.lock().role
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let state = self.lock();
        state.token.is_some() && state.user.is_some() && state.role.is_some()
    }

    /// Stores a fresh session and persists all three entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the user record cannot be serialized or the store
    /// write fails. The in-memory session is updated either way.
    pub fn login(&self, token: String, user: User, role: Role) -> Result<()> {
        let record = SessionRecord {
            token: Some(token.clone()),
            user: Some(serde_json::to_string(&user).map_err(|e| {
                crate::domain::JobBoardError::Storage(format!("failed to serialize user: {e}"))
            })?),
            user_type: Some(role.as_str().to_string()),
        };

        *self.lock() = SessionState { token: Some(token), user: Some(user), role: Some(role) };
        tracing::info!(role = %role, "signed in");
        self.store.save(&record)
    }

    /// Forgets the session and removes the persisted entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn logout(&self) -> Result<()> {
        *self.lock() = SessionState::default();
        tracing::info!("signed out");
        self.store.clear()
    }

    /// Like [`logout`](Self::logout), for a session the backend rejected.
    /// Store errors are logged rather than returned.
    pub fn expire(&self) {
        *self.lock() = SessionState::default();
        tracing::info!("session expired");
        Self::clear_store(self.store.as_ref());
    }
}
