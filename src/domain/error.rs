//! Error types for the job-board client.
//!
//! This module defines the centralized error type [`JobBoardError`] and a type alias
//! [`Result`] used throughout the crate. Gateway failures are split by whether the
//! backend answered at all: a `Gateway` error carries the server's status and message,
//! a `Network` error means no response arrived.

use thiserror::Error;

/// The main error type for job-board client operations.
///
/// # Examples
///
/// ```
/// use jobboard::JobBoardError;
///
/// let err = JobBoardError::Gateway { status: 404, message: "Job not found".to_string() };
/// assert_eq!(err.to_string(), "Job not found");
/// ```
#[derive(Debug, Error)]
pub enum JobBoardError {
    /// The backend responded with a non-success status.
    ///
    /// `message` is the server-provided `detail` when present, otherwise
    /// `"HTTP error, status <code>"`. Displayed verbatim to the user.
    #[error("{message}")]
    Gateway {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },

    /// No response was received (connection failure, timeout, broken body).
    #[error("Network error: {0}")]
    Network(String),

    /// Persisted or received data could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The backend rejected the credential with 401.
    ///
    /// By the time this is returned the session has already been cleared and the
    /// client has navigated to the login view.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Session storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A fetch task could not report back to the controller.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl JobBoardError {
    /// Returns `true` for the 401 case, which callers treat as a redirect rather
    /// than a displayable failure.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// A specialized `Result` type for job-board operations.
pub type Result<T> = std::result::Result<T, JobBoardError>;
