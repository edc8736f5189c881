//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the CLI loop (main.rs) and the
//! domain/gateway/worker layers. It owns the listing view's filter state and the
//! rules for when that state turns into a backend fetch.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`fetch`]: Fetch epochs and the stale-result guard
//! - [`filters`]: Filter state and its query-parameter projection
//! - [`handler`]: Event processing and fetch decisions
//! - [`input`]: Parsing of interactive command lines into events
//! - [`routes`]: Views and the navigation seam
//! - [`state`]: Listing state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::{handle_event, AppState, Event};
//! use jobboard::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), jobboard::JobBoardError>(())
//! ```

pub mod actions;
pub mod fetch;
pub mod filters;
pub mod handler;
pub mod input;
pub mod routes;
pub mod state;

pub use actions::Action;
pub use fetch::{FetchEpoch, FetchPhase, FetchTracker, MountGeneration};
pub use filters::{to_query_parameters, FilterState, JobType, QueryParameters};
pub use handler::{handle_event, Event};
pub use input::{parse_command, Command};
pub use routes::{ChannelNavigator, Navigator, Route};
pub use state::{AppState, ViewContent};
