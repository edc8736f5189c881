//! Persistent session storage.
//!
//! The signed-in session survives restarts as three string entries: the bearer
//! token, the serialized user record and the role marker. This module provides
//! the storage abstraction for those entries and the [`SessionContext`] that the
//! gateway consults on every request.
//!
//! # Modules
//!
//! - `backend`: [`SessionStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based store with atomic writes
//! - `memory`: in-process store for tests and ephemeral sessions
//! - `models`: the persisted [`SessionRecord`]
//! - `session`: [`SessionContext`], the in-memory view rehydrated at startup

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
pub mod session;

pub use backend::SessionStore;
pub use json::JsonSessionStore;
pub use memory::MemorySessionStore;
pub use models::SessionRecord;
pub use session::SessionContext;
