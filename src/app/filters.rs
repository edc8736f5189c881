//! Filter state for the job listing and its projection into query parameters.
//!
//! [`FilterState`] holds the user's current selections. [`to_query_parameters`]
//! turns a state snapshot into the canonical parameter set sent to `GET /jobs/`.
//! Nothing in this module performs I/O; the controller decides when to fetch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Upper bound of the salary slider.
pub const SALARY_CEILING_MAX: u32 = 200_000;

/// Job-type selector values.
///
/// `Any` is the empty selection and is never sent to the backend. The other
/// variants project to their UI label verbatim (`Full-time`, `Part-time`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    Any,
    FullTime,
    PartTime,
    Contract,
    Remote,
}

impl JobType {
    /// Query-parameter value, `None` for [`JobType::Any`].
    #[must_use]
    pub const fn as_param(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::FullTime => Some("Full-time"),
            Self::PartTime => Some("Part-time"),
            Self::Contract => Some("Contract"),
            Self::Remote => Some("Remote"),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or("All Types"))
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "" | "any" | "all" | "alltypes" => Ok(Self::Any),
            "fulltime" => Ok(Self::FullTime),
            "parttime" => Ok(Self::PartTime),
            "contract" => Ok(Self::Contract),
            "remote" => Ok(Self::Remote),
            _ => Err(format!("unknown job type: {s}")),
        }
    }
}

/// Current search and filter selections for the job listing.
///
/// Created with defaults when the listing view mounts, mutated through the
/// setter methods, reset by [`FilterState::clear`]. Every setter reports whether
/// the state actually changed so the controller can skip redundant fetches.
///
/// `salary_ceiling` is private to keep it inside `[0, SALARY_CEILING_MAX]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub free_text_query: String,
    pub location: String,
    pub selected_skills: BTreeSet<String>,
    pub job_type: JobType,
    salary_ceiling: u32,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn salary_ceiling(&self) -> u32 {
        self.salary_ceiling
    }

    /// Replaces the free-text query.
    pub fn set_query(&mut self, query: &str) -> bool {
        if self.free_text_query == query {
            return false;
        }
        self.free_text_query = query.to_string();
        true
    }

    /// Replaces the location filter.
    pub fn set_location(&mut self, location: &str) -> bool {
        if self.location == location {
            return false;
        }
        self.location = location.to_string();
        true
    }

    /// Adds the skill if absent, removes it if present. Always a change.
    pub fn toggle_skill(&mut self, skill: &str) -> bool {
        if !self.selected_skills.remove(skill) {
            self.selected_skills.insert(skill.to_string());
        }
        true
    }

    pub fn set_job_type(&mut self, job_type: JobType) -> bool {
        if self.job_type == job_type {
            return false;
        }
        self.job_type = job_type;
        true
    }

    /// Sets the salary ceiling, clamped to [`SALARY_CEILING_MAX`].
    pub fn set_salary_ceiling(&mut self, ceiling: u32) -> bool {
        let clamped = ceiling.min(SALARY_CEILING_MAX);
        if self.salary_ceiling == clamped {
            return false;
        }
        self.salary_ceiling = clamped;
        true
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_default();
        *self = Self::default();
        changed
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    /// Whether any filter besides the free-text query is active.
    ///
    /// Mirrors the visibility rule of the "Clear All" control.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.selected_skills.is_empty() || self.job_type != JobType::Any || !self.location.is_empty()
    }
}

/// Ordered mapping of query-parameter name to value.
///
/// Derived from a [`FilterState`] on every change and never persisted. Keys
/// appear in a fixed order so two equal states always render the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters(Vec<(String, String)>);

impl QueryParameters {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.0.iter_mut().find(|(k, _)| k == key) {
            existing.1 = value;
        } else {
            self.0.push((key.to_string(), value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// URL-encoded form (`search=rust+dev&tags=React`), empty when there are no
    /// parameters.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let Ok(mut url) = reqwest::Url::parse("http://localhost/") else {
            return String::new();
        };
        url.query_pairs_mut().extend_pairs(self.0.iter());
        url.query().unwrap_or_default().to_string()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryParameters {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        params
    }
}

/// Projects filter state into backend query parameters.
///
/// - `search` iff the free-text query is non-empty
/// - `tags` as a comma-joined list iff any skill is selected
/// - `job_type` iff a type is chosen
/// - `location` iff non-empty
/// - `salary_min` iff the salary ceiling is above zero
///
/// The salary slider is a ceiling in the UI but the backend receives it as the
/// minimum salary. That mapping is kept as-is until product intent is settled.
///
/// # Example
///
/// ```
/// use jobboard::app::filters::{to_query_parameters, FilterState, JobType};
///
/// let mut state = FilterState::new();
/// state.toggle_skill("React");
/// state.set_job_type(JobType::FullTime);
///
/// let params = to_query_parameters(&state);
/// assert_eq!(params.get("tags"), Some("React"));
/// assert_eq!(params.get("job_type"), Some("Full-time"));
/// assert_eq!(params.len(), 2);
/// ```
#[must_use]
pub fn to_query_parameters(state: &FilterState) -> QueryParameters {
    let mut params = QueryParameters::new();

    if !state.free_text_query.is_empty() {
        params.insert("search", state.free_text_query.as_str());
    }
    if !state.selected_skills.is_empty() {
        let joined = state
            .selected_skills
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        params.insert("tags", joined);
    }
    if let Some(job_type) = state.job_type.as_param() {
        params.insert("job_type", job_type);
    }
    if !state.location.is_empty() {
        params.insert("location", state.location.as_str());
    }
    if state.salary_ceiling > 0 {
        params.insert("salary_min", state.salary_ceiling.to_string());
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_projects_to_nothing() {
        assert!(to_query_parameters(&FilterState::new()).is_empty());
    }

    #[test]
    fn react_full_time_projects_exactly() {
        let mut state = FilterState::new();
        state.toggle_skill("React");
        state.set_job_type("Full-time".parse().unwrap());
        state.set_location("");
        state.set_salary_ceiling(0);

        let expected = QueryParameters::from([("tags", "React"), ("job_type", "Full-time")]);
        assert_eq!(to_query_parameters(&state), expected);
    }

    #[test]
    fn salary_ceiling_is_sent_as_salary_min() {
        let mut state = FilterState::new();
        state.set_salary_ceiling(120_000);
        let params = to_query_parameters(&state);
        assert_eq!(params.get("salary_min"), Some("120000"));
        assert_eq!(params.get("salary_max"), None);
    }

    #[test]
    fn salary_min_present_iff_ceiling_positive() {
        for ceiling in [0, 1, 10_000, 200_000, 500_000] {
            let mut state = FilterState::new();
            state.set_salary_ceiling(ceiling);
            let params = to_query_parameters(&state);
            assert_eq!(params.get("salary_min").is_some(), state.salary_ceiling() > 0);
        }
    }

    #[test]
    fn salary_ceiling_is_clamped() {
        let mut state = FilterState::new();
        assert!(state.set_salary_ceiling(999_999));
        assert_eq!(state.salary_ceiling(), SALARY_CEILING_MAX);
        assert!(!state.set_salary_ceiling(SALARY_CEILING_MAX));
    }

    #[test]
    fn double_toggle_restores_skill_set() {
        let mut state = FilterState::new();
        state.toggle_skill("Rust");
        let before = state.selected_skills.clone();

        state.toggle_skill("Go");
        state.toggle_skill("Go");
        assert_eq!(state.selected_skills, before);

        state.toggle_skill("Rust");
        state.toggle_skill("Rust");
        assert_eq!(state.selected_skills, before);
    }

    #[test]
    fn tags_are_comma_joined_in_canonical_order() {
        let mut a = FilterState::new();
        a.toggle_skill("TypeScript");
        a.toggle_skill("React");

        let mut b = FilterState::new();
        b.toggle_skill("React");
        b.toggle_skill("TypeScript");

        assert_eq!(to_query_parameters(&a), to_query_parameters(&b));
        assert_eq!(to_query_parameters(&a).get("tags"), Some("React,TypeScript"));
    }

    #[test]
    fn setters_report_changes() {
        let mut state = FilterState::new();
        assert!(state.set_query("rust"));
        assert!(!state.set_query("rust"));
        assert!(state.set_job_type(JobType::Remote));
        assert!(!state.set_job_type(JobType::Remote));
        assert!(state.clear());
        assert!(!state.clear());
        assert!(state.is_default());
    }

    #[test]
    fn query_string_is_url_encoded() {
        let mut state = FilterState::new();
        state.set_query("rust & go");
        state.set_location("São Paulo");
        assert_eq!(
            to_query_parameters(&state).to_query_string(),
            "search=rust+%26+go&location=S%C3%A3o+Paulo"
        );
    }

    #[test]
    fn job_type_parsing_accepts_labels_and_slugs() {
        assert_eq!("Full-time".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!("part_time".parse::<JobType>(), Ok(JobType::PartTime));
        assert_eq!("".parse::<JobType>(), Ok(JobType::Any));
        assert!("freelance".parse::<JobType>().is_err());
    }
}
