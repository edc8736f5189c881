//! Actions representing side effects to be executed by the runtime.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O itself. It
//! returns a `Vec<Action>` and the runtime executes them in order: fetches are
//! posted to the worker, session changes go through the gateway client.
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::{Action, FetchEpoch, MountGeneration};
//! use jobboard::app::filters::QueryParameters;
//! use jobboard::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::list_jobs(FetchEpoch(1), QueryParameters::new())),
//!     Action::PostToWorker(WorkerMessage::list_tags(MountGeneration(1))),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a backend request on the worker. The response comes back later as
    /// an [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Clears the session (token, cached user, role marker).
    Logout,

    /// Leaves the interactive loop.
    Quit,
}
