//! Storage record model for the persisted session.

use serde::{Deserialize, Serialize};

/// The persisted session entries.
///
/// Entries are stored as independent optional strings, so a partially written
/// or hand-edited file can still be read. A session is only considered
/// authenticated when all three are present and `user` parses.
///
/// # File Format
///
/// ```json
/// {
///   "token": "eyJhbGciOi...",
///   "user": "{\"id\":1,\"email\":\"ada@example.com\",...}",
///   "userType": "user"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Bearer token returned by the login endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// JSON-serialized [`User`](crate::domain::User).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Role marker, `user` or `company`.
    #[serde(default, rename = "userType", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl SessionRecord {
    /// Whether every entry is present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.token.is_some() && self.user.is_some() && self.user_type.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none() && self.user_type.is_none()
    }
}
