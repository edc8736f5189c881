//! View model types representing renderable listing state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready strings,
//! which keeps rendering a straight walk over the data.

/// Complete view model for the job listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingViewModel {
    pub header: HeaderInfo,

    /// Active filters and the skill picker.
    pub filter_bar: FilterBarInfo,

    /// One row per job on screen.
    pub rows: Vec<JobRow>,

    /// e.g. "3 jobs found".
    pub result_count: String,

    /// Listing error banner.
    pub error: Option<String>,

    /// Tag vocabulary error, shown next to the skill picker.
    pub tags_error: Option<String>,

    /// A listing fetch is in flight.
    pub loading: bool,

    /// Set when there is nothing to list and nothing loading.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// Filter summary shown above the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    /// `(label, value)` pairs for each active filter.
    pub entries: Vec<(String, String)>,

    /// Known skills with their selection state.
    pub skills: Vec<SkillOption>,

    /// Whether the "clear all" hint applies.
    pub show_clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillOption {
    pub name: String,
    pub selected: bool,
}

/// Display information for a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    /// Formatted range, e.g. "$50,000 - $90,000".
    pub salary: String,
    /// e.g. "3 days ago".
    pub posted: String,
    pub tags: Vec<String>,

    /// Character ranges of `title` matched by the search query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hint line.
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No jobs found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
