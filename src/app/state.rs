//! Listing-view state and view model computation.
//!
//! [`AppState`] is the single source of truth for the job listing view: the
//! filter selections, the displayed jobs, the tag vocabulary, fetch bookkeeping
//! and the current route. It is mutated only by the event handler.
//!
//! # State Components
//!
//! - **Filters**: current [`FilterState`]
//! - **Jobs**: the list currently on screen; replaced only by the latest fetch
//! - **Tags**: skill vocabulary for the filter sidebar
//! - **Listing tracker**: latest issued [`FetchEpoch`](super::fetch::FetchEpoch)
//! - **Errors**: listing and tag failures, tracked separately
//! - **View content**: the record or catalog shown on detail and company routes
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::AppState;
//! use jobboard::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let viewmodel = state.compute_viewmodel(chrono::Utc::now());
//! assert!(viewmodel.rows.is_empty());
//! ```

use super::fetch::{FetchPhase, FetchTracker, MountGeneration};
use super::filters::FilterState;
use super::routes::Route;
use crate::domain::{Company, Job, Tag};
use crate::ui::helpers::{format_salary, format_thousands};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, JobRow, ListingViewModel, SkillOption,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

/// What a non-listing route currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewContent {
    #[default]
    Empty,
    /// A fetch for the current route is in flight.
    Loading,
    Job(Box<Job>),
    Companies(Vec<Company>),
    Company(Box<Company>),
    /// The fetch for the current route failed with this message.
    Failed(String),
}

/// Central state container for the listing view.
#[derive(Debug, Clone)]
pub struct AppState {
    /// View currently shown.
    pub route: Route,

    /// Search and filter selections.
    pub filters: FilterState,

    /// Jobs on screen. A failed fetch leaves this untouched.
    pub jobs: Vec<Job>,

    /// Skill vocabulary offered in the filter bar.
    pub tags: Vec<Tag>,

    /// Message from the last failed listing fetch.
    pub error: Option<String>,

    /// Message from a failed tag-vocabulary fetch.
    pub tags_error: Option<String>,

    /// Content of the job detail, company catalog and company detail routes.
    pub view: ViewContent,

    /// Color scheme for rendering.
    pub theme: Theme,

    pub(crate) listing: FetchTracker,
    pub(crate) tags_phase: FetchPhase,
    pub(crate) mounted: bool,
    pub(crate) mount_generation: MountGeneration,
}

impl AppState {
    /// Creates an unmounted listing state.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            route: Route::Jobs,
            filters: FilterState::new(),
            jobs: vec![],
            tags: vec![],
            error: None,
            tags_error: None,
            view: ViewContent::Empty,
            theme,
            listing: FetchTracker::new(),
            tags_phase: FetchPhase::Idle,
            mounted: false,
            mount_generation: MountGeneration::default(),
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn mount_generation(&self) -> MountGeneration {
        self.mount_generation
    }

    #[must_use]
    pub const fn listing_phase(&self) -> FetchPhase {
        self.listing.phase()
    }

    #[must_use]
    pub const fn tags_phase(&self) -> FetchPhase {
        self.tags_phase
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.listing.phase().is_loading()
    }

    /// Resolves free-form skill input against the tag vocabulary.
    ///
    /// Selected skills and known tags are checked for a case-insensitive exact
    /// match first. Otherwise the input is completed to a known tag only when
    /// it is the start of that tag or of one of its words ("type" becomes
    /// "TypeScript", "native" becomes "React Native"); the fuzzy score ranks
    /// competing completions. Anything else is used as typed, so "go" never
    /// turns into "MongoDB".
    #[must_use]
    pub fn resolve_skill(&self, input: &str) -> String {
        use fuzzy_matcher::FuzzyMatcher;

        let input = input.trim();
        if input.is_empty() {
            return String::new();
        }
        let exact = self
            .filters
            .selected_skills
            .iter()
            .map(String::as_str)
            .chain(self.tags.iter().map(|t| t.name.as_str()))
            .find(|name| name.eq_ignore_ascii_case(input));
        if let Some(name) = exact {
            return name.to_string();
        }

        let needle = input.to_lowercase();
        let matcher = SkimMatcherV2::default();
        let best = self
            .tags
            .iter()
            .filter(|tag| completes(&tag.name, &needle))
            .filter_map(|tag| matcher.fuzzy_match(&tag.name, input).map(|score| (score, tag)))
            .max_by_key(|(score, _)| *score);

        best.map_or_else(
            || input.to_string(),
            |(score, tag)| {
                tracing::debug!(input = %input, tag = %tag.name, score = score, "skill completed from vocabulary");
                tag.name.clone()
            },
        )
    }

    /// Computes a renderable view model for the listing.
    ///
    /// `now` anchors the "posted N days ago" column.
    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>) -> ListingViewModel {
        let loading = self.is_loading();
        let matcher = if self.filters.free_text_query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let rows = self
            .jobs
            .iter()
            .map(|job| JobRow {
                id: job.id,
                title: job.title.clone(),
                company: job.company_name(),
                location: job.location.clone().unwrap_or_default(),
                job_type: job.job_type.clone(),
                salary: format_salary(job.salary_min, job.salary_max),
                posted: job.posted_ago(now),
                tags: job.tags.iter().map(|t| t.name.clone()).collect(),
                highlight_ranges: matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&job.title, m)),
            })
            .collect::<Vec<_>>();

        let count = self.jobs.len();
        let empty_state = (!loading && rows.is_empty()).then(|| EmptyState {
            message: "No jobs found".to_string(),
            subtitle: "Try adjusting your filters or search terms".to_string(),
        });

        ListingViewModel {
            header: HeaderInfo {
                title: "Find Your Perfect Job".to_string(),
                subtitle: if loading && rows.is_empty() {
                    "Loading...".to_string()
                } else {
                    format!("Browse through {count} available positions")
                },
            },
            filter_bar: self.compute_filter_bar(),
            rows,
            result_count: format!("{count} job{} found", if count == 1 { "" } else { "s" }),
            error: self.error.clone(),
            tags_error: self.tags_error.clone(),
            loading,
            empty_state,
            footer: FooterInfo {
                keybindings: "search <text> [@ <location>]  skill <name>  type <job type>  salary <amount>  clear  quit"
                    .to_string(),
            },
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let filters = &self.filters;
        let mut entries = Vec::new();

        if !filters.free_text_query.is_empty() {
            entries.push(("Search".to_string(), filters.free_text_query.clone()));
        }
        if !filters.location.is_empty() {
            entries.push(("Location".to_string(), filters.location.clone()));
        }
        if !filters.selected_skills.is_empty() {
            let skills = filters.selected_skills.iter().cloned().collect::<Vec<_>>().join(", ");
            entries.push(("Skills".to_string(), skills));
        }
        if filters.job_type.as_param().is_some() {
            entries.push(("Type".to_string(), filters.job_type.to_string()));
        }
        if filters.salary_ceiling() > 0 {
            entries.push((
                "Salary".to_string(),
                format!("${}", format_thousands(i64::from(filters.salary_ceiling()))),
            ));
        }

        let mut skills: Vec<SkillOption> = self
            .tags
            .iter()
            .map(|tag| SkillOption {
                name: tag.name.clone(),
                selected: filters.selected_skills.contains(&tag.name),
            })
            .collect();
        // Selected skills missing from the vocabulary still show up as checked.
        for skill in &filters.selected_skills {
            if !self.tags.iter().any(|t| &t.name == skill) {
                skills.push(SkillOption { name: skill.clone(), selected: true });
            }
        }

        FilterBarInfo {
            entries,
            skills,
            show_clear: filters.has_active_filters(),
        }
    }

    /// Character ranges of `text` matched by the free-text query, coalesced
    /// into `(start, end)` runs with exclusive ends.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.filters.free_text_query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }
}

/// Whether lowercase `needle` starts `name` or one of its words.
fn completes(name: &str, needle: &str) -> bool {
    let name = name.to_lowercase();
    name.starts_with(needle) || name.split(|c: char| !c.is_alphanumeric()).any(|word| word.starts_with(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> Tag {
        serde_json::from_value(serde_json::json!({
            "id": 1, "name": name,
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
        }))
        .unwrap()
    }

    fn job(id: i64, title: &str) -> Job {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": title, "description": "d", "location": "Remote",
            "job_type": "remote", "job_level": "mid", "salary_min": 50000, "salary_max": 90000,
            "is_active": true, "company_id": 2,
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
        }))
        .unwrap()
    }

    #[test]
    fn resolve_skill_prefers_exact_case_insensitive_match() {
        let mut state = AppState::new(Theme::monochrome());
        state.tags = vec![tag("React"), tag("React Native"), tag("Rust")];
        assert_eq!(state.resolve_skill("react"), "React");
    }

    #[test]
    fn resolve_skill_completes_prefixes_then_falls_back_to_raw() {
        let mut state = AppState::new(Theme::monochrome());
        state.tags = vec![tag("TypeScript"), tag("React Native"), tag("Rust")];
        assert_eq!(state.resolve_skill("type"), "TypeScript");
        assert_eq!(state.resolve_skill("native"), "React Native");
        assert_eq!(state.resolve_skill("zzz"), "zzz");
        assert_eq!(state.resolve_skill("tscript"), "tscript");
        assert_eq!(state.resolve_skill("   "), "");
    }

    #[test]
    fn resolve_skill_keeps_short_names_that_only_appear_inside_tags() {
        let mut state = AppState::new(Theme::monochrome());
        state.tags = vec![tag("Django"), tag("MongoDB")];
        assert_eq!(state.resolve_skill("go"), "go");
        assert_eq!(state.resolve_skill("Go"), "Go");
        assert_eq!(state.resolve_skill("mongo"), "MongoDB");
    }

    #[test]
    fn viewmodel_counts_and_empty_state() {
        let mut state = AppState::new(Theme::monochrome());
        let vm = state.compute_viewmodel(Utc::now());
        assert_eq!(vm.result_count, "0 jobs found");
        assert!(vm.empty_state.is_some());

        state.jobs = vec![job(1, "Rust Developer")];
        let vm = state.compute_viewmodel(Utc::now());
        assert_eq!(vm.result_count, "1 job found");
        assert_eq!(vm.rows[0].salary, "$50,000 - $90,000");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn viewmodel_highlights_query_in_titles() {
        let mut state = AppState::new(Theme::monochrome());
        state.jobs = vec![job(1, "Rust Developer")];
        state.filters.set_query("rust");
        let vm = state.compute_viewmodel(Utc::now());
        assert_eq!(vm.rows[0].highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn filter_bar_lists_active_filters_and_skills() {
        let mut state = AppState::new(Theme::monochrome());
        state.tags = vec![tag("React"), tag("Rust")];
        state.filters.toggle_skill("React");
        state.filters.toggle_skill("Elixir");
        state.filters.set_salary_ceiling(80_000);

        let bar = state.compute_viewmodel(Utc::now()).filter_bar;
        assert!(bar.show_clear);
        assert!(bar.entries.contains(&("Salary".to_string(), "$80,000".to_string())));
        let selected: Vec<_> = bar.skills.iter().filter(|s| s.selected).map(|s| s.name.as_str()).collect();
        assert_eq!(selected, vec!["React", "Elixir"]);
    }
}
