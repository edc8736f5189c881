//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the session file and trace exports live on the host.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_data_dir};
