//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `ListingViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Detail and company routes draw whatever [`ViewContent`] the controller has
//! stored; rendering never fetches.
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::AppState;
//! use jobboard::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::monochrome());
//! let mut out = Vec::new();
//! render(&mut out, &state, chrono::Utc::now(), 80)?;
//! assert!(String::from_utf8_lossy(&out).contains("No jobs found"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::app::{AppState, Route, ViewContent};
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListingViewModel;
use chrono::{DateTime, Utc};
use std::io::{self, Write};

/// Renders the current route of `state` to `out`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render(out: &mut impl Write, state: &AppState, now: DateTime<Utc>, cols: usize) -> io::Result<()> {
    let theme = &state.theme;
    match state.route {
        Route::Jobs => render_viewmodel(out, &state.compute_viewmodel(now), theme, cols),
        Route::Login => writeln!(
            out,
            "Signed out. Run `jobboard login --as <user|company>` to sign in, or `jobs` to keep browsing."
        ),
        Route::JobDetail(_) | Route::Companies | Route::CompanyDetail(_) => match &state.view {
            ViewContent::Empty => Ok(()),
            ViewContent::Loading => {
                writeln!(out, "{}Loading {}...{}", theme.fg(&theme.colors.text_dim), state.route.path(), theme.reset())
            }
            ViewContent::Failed(message) => {
                writeln!(out, "{}{}Error: {message}{}", theme.bold(), theme.fg(&theme.colors.error_fg), theme.reset())
            }
            ViewContent::Job(job) => components::render_job_detail(out, job, theme, now),
            ViewContent::Companies(companies) => components::render_company_list(out, companies, theme, cols),
            ViewContent::Company(company) => components::render_company_detail(out, company, theme),
        },
    }
}

/// Renders a precomputed view model.
///
/// Layout:
///
/// ```text
/// [Header + subtitle]
/// [Border]
/// [Active filters]
/// [Skill picker]
/// [Error banner]            only after a failed fetch
/// [Result count]
/// [Job rows | Empty state | Loading]
/// [Border]
/// [Footer]
/// ```
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_viewmodel(out: &mut impl Write, vm: &ListingViewModel, theme: &Theme, cols: usize) -> io::Result<()> {
    components::render_header(out, &vm.header, theme, cols)?;
    components::render_border(out, theme, cols)?;
    components::render_filter_bar(out, &vm.filter_bar, vm.tags_error.as_deref(), theme)?;

    if let Some(error) = &vm.error {
        writeln!(out, "{}{}Error: {error}{}", theme.bold(), theme.fg(&theme.colors.error_fg), theme.reset())?;
    }

    writeln!(out)?;
    if vm.loading && vm.rows.is_empty() {
        writeln!(out, "{}Loading jobs...{}", theme.fg(&theme.colors.text_dim), theme.reset())?;
    } else if let Some(empty) = &vm.empty_state {
        components::render_empty_state(out, empty, theme, cols)?;
    } else {
        let suffix = if vm.loading { " (refreshing)" } else { "" };
        writeln!(out, "{}{}{suffix}{}", theme.bold(), vm.result_count, theme.reset())?;
        components::render_job_rows(out, &vm.rows, theme, cols)?;
    }

    components::render_border(out, theme, cols)?;
    components::render_footer(out, &vm.footer, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Job;

    fn job() -> Job {
        serde_json::from_value(serde_json::json!({
            "id": 12, "title": "Rust Developer", "description": "d", "location": "Berlin",
            "job_type": "full-time", "job_level": "mid", "salary_min": 50000, "salary_max": 90000,
            "is_active": true, "company_id": 2,
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
            "tags": [{"id": 1, "name": "Rust", "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00"}],
        }))
        .unwrap()
    }

    fn rendered(state: &AppState) -> String {
        let mut out = Vec::new();
        render(&mut out, state, Utc::now(), 80).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_rows_and_count() {
        let mut state = AppState::new(Theme::monochrome());
        state.jobs = vec![job()];
        let text = rendered(&state);
        assert!(text.contains("1 job found"));
        assert!(text.contains("#12 Rust Developer"));
        assert!(text.contains("$50,000 - $90,000"));
        assert!(text.contains("company #2 · Berlin · full-time"));
        assert!(text.contains("[Rust]"));
    }

    #[test]
    fn detail_route_draws_stored_content() {
        let mut state = AppState::new(Theme::monochrome());
        state.route = Route::JobDetail(12);
        state.view = ViewContent::Loading;
        assert!(rendered(&state).contains("Loading /jobs/12..."));

        state.view = ViewContent::Job(Box::new(job()));
        let text = rendered(&state);
        assert!(text.contains("Rust Developer"));
        assert!(text.contains("Berlin"));

        state.route = Route::Companies;
        state.view = ViewContent::Failed("HTTP error, status 500".into());
        assert!(rendered(&state).contains("Error: HTTP error, status 500"));
    }

    #[test]
    fn error_banner_keeps_previous_rows() {
        let mut state = AppState::new(Theme::monochrome());
        state.jobs = vec![job()];
        state.error = Some("Network error: request timed out".into());
        let text = rendered(&state);
        assert!(text.contains("Error: Network error: request timed out"));
        assert!(text.contains("Rust Developer"));
    }

    #[test]
    fn tag_error_is_shown_beside_filters() {
        let mut state = AppState::new(Theme::monochrome());
        state.tags_error = Some("HTTP error, status 500".into());
        let text = rendered(&state);
        assert!(text.contains("Skills unavailable: HTTP error, status 500"));
        assert!(!text.contains("Error: HTTP"));
    }
}
