//! Event handling: the synchronization controller for the job listing.
//!
//! User actions, worker responses and navigation requests all arrive as
//! [`Event`]s. [`handle_event`] applies them to [`AppState`] and returns the
//! side effects to run. Fetches are issued on discrete user actions rather than
//! by re-evaluating state after every change.
//!
//! # Fetch Rules
//!
//! - **Mount**: unfiltered listing + tag vocabulary, fetched concurrently and
//!   reconciled independently
//! - **Filter change**: refetch iff the state changed and the projected query
//!   parameters are non-empty (a search submit refetches even when unchanged)
//! - **Filter change to an empty projection**: no fetch; any fetch still in
//!   flight is abandoned so it cannot repaint the list
//! - **Clear**: always refetch without parameters
//! - **Results**: applied only for the latest issued epoch; older results are
//!   dropped without touching the screen. Tag results must belong to the
//!   current mount
//! - **Detail and company routes**: navigating there issues one fetch; its
//!   result is applied only while that route is still shown
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::{handle_event, AppState, Event};
//! use jobboard::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), jobboard::JobBoardError>(())
//! ```

use super::fetch::{FetchPhase, Outcome};
use super::filters::{to_query_parameters, FilterState, JobType, QueryParameters};
use super::routes::Route;
use super::state::ViewContent;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{ExpiredFetch, WorkerMessage, WorkerResponse};

/// Events triggered by user input, worker responses or navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The listing view is shown: reset filters and load listing + tags.
    Mount,
    /// The listing view is left: filter state and listing are discarded.
    Unmount,

    /// Replaces the free-text query.
    SetQuery(String),
    /// Replaces the location filter.
    SetLocation(String),
    /// Search-bar submit: sets query and location together.
    Search {
        query: String,
        location: String,
    },
    /// Adds or removes a skill tag. Input is resolved against the vocabulary.
    ToggleSkill(String),
    /// Selects a job type (`JobType::Any` clears it).
    SetJobType(JobType),
    /// Moves the salary slider.
    SetSalaryCeiling(u32),
    /// Resets every filter and reloads the unfiltered listing.
    ClearFilters,

    /// Moves to another view. Leaving the listing unmounts it; returning to it
    /// mounts it again. Detail and company views load their content.
    Navigate(Route),
    /// Signs out.
    Logout,
    /// Leaves the application.
    Quit,

    /// A backend request issued earlier has completed.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for handlers
/// that validate input.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount => Ok((true, mount(state))),
        Event::Unmount => {
            unmount(state);
            Ok((false, vec![]))
        }
        Event::SetQuery(query) => Ok(apply_filter(state, |f| f.set_query(query), false)),
        Event::SetLocation(location) => Ok(apply_filter(state, |f| f.set_location(location), false)),
        Event::Search { query, location } => Ok(apply_filter(
            state,
            |f| {
                let query_changed = f.set_query(query);
                let location_changed = f.set_location(location);
                query_changed || location_changed
            },
            true,
        )),
        Event::ToggleSkill(input) => {
            let skill = state.resolve_skill(input);
            if skill.is_empty() {
                return Ok((false, vec![]));
            }
            Ok(apply_filter(state, |f| f.toggle_skill(&skill), false))
        }
        Event::SetJobType(job_type) => Ok(apply_filter(state, |f| f.set_job_type(*job_type), false)),
        Event::SetSalaryCeiling(ceiling) => {
            Ok(apply_filter(state, |f| f.set_salary_ceiling(*ceiling), false))
        }
        Event::ClearFilters => {
            if !state.mounted {
                return Ok((false, vec![]));
            }
            state.filters.clear();
            tracing::debug!("filters cleared, reloading unfiltered listing");
            Ok((true, vec![issue_listing_fetch(state, QueryParameters::new())]))
        }
        Event::Navigate(route) => {
            tracing::debug!(from = %state.route.path(), to = %route.path(), "navigating");
            if *route == Route::Jobs && !state.mounted {
                return Ok((true, mount(state)));
            }
            if *route != Route::Jobs && state.mounted {
                unmount(state);
            }
            state.route = *route;
            Ok((true, load_view(state)))
        }
        Event::Logout => Ok((true, vec![Action::Logout])),
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => Ok((apply_response(state, response), vec![])),
    }
}

fn mount(state: &mut AppState) -> Vec<Action> {
    tracing::debug!("mounting listing view");
    state.route = Route::Jobs;
    state.view = ViewContent::Empty;
    state.mounted = true;
    state.mount_generation = state.mount_generation.next();
    state.filters = FilterState::new();
    state.error = None;
    state.tags_error = None;
    state.tags_phase = FetchPhase::InFlight;

    vec![
        issue_listing_fetch(state, QueryParameters::new()),
        Action::PostToWorker(WorkerMessage::list_tags(state.mount_generation)),
    ]
}

/// Issues the fetch behind a detail or company route.
fn load_view(state: &mut AppState) -> Vec<Action> {
    let message = match state.route {
        Route::JobDetail(id) => WorkerMessage::get_job(id),
        Route::Companies => WorkerMessage::list_companies(),
        Route::CompanyDetail(id) => WorkerMessage::get_company(id),
        Route::Jobs | Route::Login => {
            state.view = ViewContent::Empty;
            return vec![];
        }
    };
    tracing::debug!(route = %state.route.path(), "loading view");
    state.view = ViewContent::Loading;
    vec![Action::PostToWorker(message)]
}

fn unmount(state: &mut AppState) {
    tracing::debug!("unmounting listing view");
    state.mounted = false;
    state.filters = FilterState::new();
    state.jobs.clear();
    state.error = None;
    state.listing.reset();
}

/// Applies a filter mutation and decides whether a refetch is warranted.
fn apply_filter<F>(state: &mut AppState, mutate: F, force: bool) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut FilterState) -> bool,
{
    if !state.mounted {
        tracing::debug!("filter change ignored, listing not mounted");
        return (false, vec![]);
    }

    let changed = mutate(&mut state.filters);
    if !changed && !force {
        tracing::trace!("filter unchanged, skipping fetch");
        return (false, vec![]);
    }

    let params = to_query_parameters(&state.filters);
    if params.is_empty() {
        tracing::debug!(abandoned = %state.listing.latest(), "no active filters, keeping current listing");
        state.listing.reset();
        return (true, vec![]);
    }

    (true, vec![issue_listing_fetch(state, params)])
}

fn issue_listing_fetch(state: &mut AppState, params: QueryParameters) -> Action {
    let epoch = state.listing.issue();
    tracing::debug!(epoch = %epoch, query = %params.to_query_string(), "issuing listing fetch");
    Action::PostToWorker(WorkerMessage::list_jobs(epoch, params))
}

/// Reconciles a worker response into state. Returns whether to re-render.
fn apply_response(state: &mut AppState, response: &WorkerResponse) -> bool {
    match response {
        WorkerResponse::JobLoaded { job } => {
            apply_view(state, Route::JobDetail(job.id), ViewContent::Job(job.clone()))
        }
        WorkerResponse::CompaniesLoaded { companies } => {
            apply_view(state, Route::Companies, ViewContent::Companies(companies.clone()))
        }
        WorkerResponse::CompanyLoaded { company } => {
            apply_view(state, Route::CompanyDetail(company.id), ViewContent::Company(company.clone()))
        }
        WorkerResponse::ViewFailed { route, message } => {
            let applied = apply_view(state, *route, ViewContent::Failed(message.clone()));
            if applied {
                tracing::warn!(route = %route.path(), error = %message, "view fetch failed");
            }
            applied
        }
        // The gateway already cleared the session and requested the login view.
        WorkerResponse::SessionExpired { fetch: ExpiredFetch::View(route) } => {
            apply_view(state, *route, ViewContent::Empty)
        }
        _ => apply_listing_response(state, response),
    }
}

/// Fills the current view, provided it is still `route` and still waiting.
fn apply_view(state: &mut AppState, route: Route, content: ViewContent) -> bool {
    if state.route != route || state.view != ViewContent::Loading {
        tracing::debug!(route = %route.path(), current = %state.route.path(), "discarding result for a view no longer shown");
        return false;
    }
    state.view = content;
    true
}

fn apply_listing_response(state: &mut AppState, response: &WorkerResponse) -> bool {
    if !state.mounted {
        tracing::debug!("response arrived after unmount, dropping");
        return false;
    }

    match response {
        WorkerResponse::JobsLoaded { epoch, jobs } => {
            if !state.listing.resolve(*epoch, Outcome::Succeeded) {
                tracing::debug!(epoch = %epoch, latest = %state.listing.latest(), "discarding stale listing result");
                return false;
            }
            tracing::debug!(epoch = %epoch, job_count = jobs.len(), "listing updated");
            state.jobs.clone_from(jobs);
            state.error = None;
            true
        }
        WorkerResponse::JobsFailed { epoch, message } => {
            if !state.listing.resolve(*epoch, Outcome::Failed) {
                tracing::debug!(epoch = %epoch, "discarding stale listing failure");
                return false;
            }
            tracing::warn!(epoch = %epoch, error = %message, "listing fetch failed");
            state.error = Some(message.clone());
            true
        }
        WorkerResponse::TagsLoaded { mount, tags } => {
            if *mount != state.mount_generation {
                tracing::debug!(mount = %mount, current = %state.mount_generation, "discarding tags from an earlier mount");
                return false;
            }
            state.tags_phase = FetchPhase::Succeeded;
            state.tags.clone_from(tags);
            state.tags_error = None;
            true
        }
        WorkerResponse::TagsFailed { mount, message } => {
            if *mount != state.mount_generation {
                tracing::debug!(mount = %mount, current = %state.mount_generation, "discarding tag failure from an earlier mount");
                return false;
            }
            tracing::warn!(error = %message, "tag vocabulary fetch failed");
            state.tags_phase = FetchPhase::Failed;
            state.tags_error = Some(message.clone());
            true
        }
        WorkerResponse::SessionExpired { fetch: ExpiredFetch::Listing(epoch) } => {
            state.listing.resolve(*epoch, Outcome::Failed)
        }
        WorkerResponse::SessionExpired { fetch: ExpiredFetch::Tags(mount) } => {
            if *mount != state.mount_generation {
                return false;
            }
            state.tags_phase = FetchPhase::Failed;
            true
        }
        WorkerResponse::JobLoaded { .. }
        | WorkerResponse::CompaniesLoaded { .. }
        | WorkerResponse::CompanyLoaded { .. }
        | WorkerResponse::ViewFailed { .. }
        | WorkerResponse::SessionExpired { fetch: ExpiredFetch::View(_) } => false,
    }
}
