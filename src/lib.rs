//! Jobboard: a terminal client for a job-board REST backend.
//!
//! Jobboard provides:
//! - A filterable job listing driven by free-text search, location, skills,
//!   job type and a salary ceiling
//! - Company and tag browsing, job posting for company accounts
//! - A persisted session (token, user, role) with automatic expiry handling
//! - Background fetches on tokio tasks with stale-result protection

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← clap + tokio
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Listing controller
//! │  - Event handling and fetch decisions               │
//! │  - Filter state and query projection                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Session     │   │ - Fetch tasks │
//! │ - Theming     │   │ - JSON file   │   │ - Responses   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Gateway (gateway/)                                 │  ← Only HTTP code
//! │  - Transport seam (reqwest)                         │
//! │  - Typed endpoints, 401 handling                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Listing controller with the event/action model
//! - [`domain`]: Backend records and the error taxonomy
//! - [`gateway`]: REST client and transport seam
//! - [`infrastructure`]: Platform paths
//! - [`storage`]: Session context and its persistence
//! - [`worker`]: Background fetch execution
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! Read from the environment:
//!
//! | Variable                 | Default                 |
//! |--------------------------|-------------------------|
//! | `JOBBOARD_API_URL`       | `http://localhost:8000` |
//! | `JOBBOARD_TIMEOUT_SECS`  | `30`                    |
//! | `JOBBOARD_THEME`         | `catppuccin-mocha`      |
//! | `JOBBOARD_THEME_FILE`    | unset                   |
//! | `JOBBOARD_TRACE_LEVEL`   | `info`                  |
//! | `JOBBOARD_DATA_DIR`      | platform data directory |
//!
//! # Example
//!
//! ```rust
//! use jobboard::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(actions.iter().all(|a| matches!(a, Action::PostToWorker(_))));
//! # Ok::<(), jobboard::JobBoardError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, FilterState, Route};
pub use domain::{Company, Job, JobBoardError, Result, Role, Tag, User};
pub use gateway::GatewayClient;
pub use storage::SessionContext;
pub use ui::Theme;

use app::Navigator;
use gateway::{ReqwestTransport, DEFAULT_TIMEOUT};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storage::JsonSessionStore;

/// Backend used when `JOBBOARD_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the job-board backend.
    pub api_url: String,

    /// Per-request timeout in seconds. Default: 30
    pub timeout_secs: u64,

    /// Built-in theme name: `catppuccin-mocha`, `catppuccin-latte` or
    /// `monochrome`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where the session and trace files live. Default: platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Parses configuration from `JOBBOARD_*` entries of a string map.
    ///
    /// Blank values count as unset. A timeout that is not a positive integer
    /// falls back to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use jobboard::Config;
    ///
    /// let mut vars = BTreeMap::new();
    /// vars.insert("JOBBOARD_API_URL".to_string(), "https://jobs.example.com".to_string());
    /// vars.insert("JOBBOARD_TIMEOUT_SECS".to_string(), "5".to_string());
    ///
    /// let config = Config::from_env_map(&vars);
    /// assert_eq!(config.api_url, "https://jobs.example.com");
    /// assert_eq!(config.timeout_secs, 5);
    /// ```
    #[must_use]
    pub fn from_env_map(vars: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let defaults = Self::default();
        Self {
            api_url: get("JOBBOARD_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            timeout_secs: get("JOBBOARD_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
            theme_name: get("JOBBOARD_THEME"),
            theme_file: get("JOBBOARD_THEME_FILE"),
            trace_level: get("JOBBOARD_TRACE_LEVEL"),
            data_dir: get("JOBBOARD_DATA_DIR").map(PathBuf::from),
        }
    }

    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Resolved data directory (override or platform default).
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::resolve_data_dir(self.data_dir.as_deref())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Loads the configured theme: file first, then name, then the default.
    /// Failures are logged and fall back to the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Creates an unmounted listing state with the configured theme.
///
/// Send [`Event::Mount`] to start fetching.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing jobboard");
    AppState::new(config.load_theme())
}

/// Builds a gateway client with the session restored from the data directory.
///
/// If the session file cannot be opened the client runs with an in-memory
/// session, so nothing is persisted across runs.
///
/// # Errors
///
/// Returns [`JobBoardError::Config`] if the API URL is invalid.
pub fn build_client(config: &Config, navigator: Arc<dyn Navigator>) -> Result<GatewayClient> {
    let transport = ReqwestTransport::new(&config.api_url, config.timeout())?;

    let session = match JsonSessionStore::in_dir(&config.data_dir()) {
        Ok(store) => SessionContext::rehydrate(Box::new(store)),
        Err(e) => {
            tracing::warn!(error = %e, "session file unavailable, session will not persist");
            SessionContext::in_memory()
        }
    };

    Ok(GatewayClient::new(Arc::new(transport), Arc::new(session), navigator))
}
