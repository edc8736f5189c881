//! Terminal rendering layer with component-based architecture.
//!
//! This module transforms view models into ANSI-styled text through composable
//! rendering components. It provides theme support and search-match
//! highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → ListingViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared formatting and highlighting utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, JobRow, ListingViewModel, SkillOption};
