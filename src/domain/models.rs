//! Backend record types.
//!
//! These mirror the JSON bodies returned by the job-board REST API. They are
//! deserialized as-is; the client never mutates a listing it received.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Backend timestamps arrive either as RFC 3339 or as naive ISO-8601 without an
/// offset. Naive values are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// A skill tag from the backend vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Condensed job entry embedded in a company record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyJobSummary {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub job_type: String,
    pub job_level: String,
    pub is_active: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// A hiring company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub email: String,
    pub company_name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub jobs: Vec<CompanyJobSummary>,
}

impl Company {
    /// Number of embedded jobs still marked active.
    #[must_use]
    pub fn active_job_count(&self) -> usize {
        self.jobs.iter().filter(|job| job.is_active).count()
    }
}

/// A job listing as returned by `GET /jobs/`.
///
/// # Fields
///
/// - `salary_min`/`salary_max`: compensation bounds, either may be absent
/// - `company`: embedded company record, absent on some backends
/// - `tags`: skill tags attached to the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub job_type: String,
    pub job_level: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub is_active: bool,
    pub company_id: i64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub company: Option<Company>,
}

impl Job {
    /// Company display name, falling back to the numeric company reference.
    #[must_use]
    pub fn company_name(&self) -> String {
        self.company
            .as_ref()
            .map_or_else(|| format!("company #{}", self.company_id), |c| c.company_name.clone())
    }

    /// Returns a human-readable string describing how long ago the job was posted.
    ///
    /// Elapsed time is rounded up to whole days:
    /// - exactly 1 day: "1 day ago"
    /// - under a week: "N days ago"
    /// - under 30 days: "N weeks ago" (weeks rounded up)
    /// - otherwise: "N months ago" (30-day months rounded up)
    ///
    /// # Examples
    ///
    /// ```
    /// # use jobboard::Job;
    /// # fn job_at(created_at: chrono::DateTime<chrono::Utc>) -> Job {
    /// #     serde_json::from_value(serde_json::json!({
    /// #         "id": 1, "title": "t", "description": "d", "location": null,
    /// #         "job_type": "remote", "job_level": "mid", "salary_min": null,
    /// #         "salary_max": null, "is_active": true, "company_id": 1,
    /// #         "created_at": created_at.to_rfc3339(), "updated_at": created_at.to_rfc3339(),
    /// #     })).unwrap()
    /// # }
    /// let now = chrono::Utc::now();
    /// let job = job_at(now - chrono::Duration::days(10));
    /// assert_eq!(job.posted_ago(now), "2 weeks ago");
    /// ```
    #[must_use]
    pub fn posted_ago(&self, now: DateTime<Utc>) -> String {
        let diff_seconds = (now - self.created_at).num_seconds().abs();
        let days = (diff_seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;

        if days == 1 {
            "1 day ago".to_string()
        } else if days < 7 {
            format!("{days} days ago")
        } else if days < 30 {
            format!("{} weeks ago", (days + 6) / 7)
        } else {
            format!("{} months ago", (days + 29) / 30)
        }
    }
}

/// Account kind: job seeker or hiring company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Company,
}

impl Role {
    /// Marker stored in the session file and used in auth endpoint paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "company" => Ok(Self::Company),
            other => Err(format!("unknown role marker: {other}")),
        }
    }
}

/// The signed-in account as cached in the session.
///
/// The login endpoint only returns a token, so the cached record is assembled
/// client-side from the login form and the chosen role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    pub role: Role,
}

impl User {
    /// Builds the placeholder record cached right after a successful login.
    #[must_use]
    pub fn after_login(email: &str, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: 1,
            email: email.to_string(),
            full_name: match role {
                Role::User => "User".to_string(),
                Role::Company => "Company".to_string(),
            },
            is_active: true,
            created_at: now,
            updated_at: now,
            role,
        }
    }
}

/// Bearer token returned by the login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Body for `POST /auth/user/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body for `POST /auth/company/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistration {
    pub email: String,
    pub password: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Body for `POST /jobs/` (company accounts only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub tag_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job_json(created_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "title": "Backend Engineer",
            "description": "Build APIs",
            "location": "Berlin",
            "job_type": "remote",
            "job_level": "senior",
            "salary_min": 60000,
            "salary_max": null,
            "is_active": true,
            "company_id": 3,
            "created_at": created_at,
            "updated_at": created_at,
            "tags": [{"id": 1, "name": "Rust", "created_at": created_at, "updated_at": created_at}],
        })
    }

    #[test]
    fn parses_naive_backend_timestamps() {
        let job: Job = serde_json::from_value(job_json("2024-03-01T12:30:00.123456")).unwrap();
        assert_eq!(job.created_at.to_rfc3339(), "2024-03-01T12:30:00.123456+00:00");
        assert_eq!(job.tags[0].name, "Rust");
        assert!(job.company.is_none());
        assert_eq!(job.company_name(), "company #3");
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let job: Job = serde_json::from_value(job_json("2024-03-01T12:30:00Z")).unwrap();
        assert_eq!(job.created_at.timestamp(), 1_709_296_200);
    }

    #[test]
    fn posted_ago_buckets() {
        let now = Utc::now();
        let mut job: Job = serde_json::from_value(job_json("2024-03-01T12:30:00Z")).unwrap();

        job.created_at = now - Duration::hours(20);
        assert_eq!(job.posted_ago(now), "1 day ago");

        job.created_at = now - Duration::days(3);
        assert_eq!(job.posted_ago(now), "3 days ago");

        job.created_at = now - Duration::days(15);
        assert_eq!(job.posted_ago(now), "3 weeks ago");

        job.created_at = now - Duration::days(45);
        assert_eq!(job.posted_ago(now), "2 months ago");
    }

    #[test]
    fn role_round_trips_through_marker() {
        assert_eq!("company".parse::<Role>(), Ok(Role::Company));
        assert_eq!(Role::User.to_string(), "user");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn company_registration_omits_empty_optionals() {
        let body = CompanyRegistration {
            email: "hr@acme.test".into(),
            password: "secret123".into(),
            company_name: "Acme".into(),
            description: None,
            website: Some("https://acme.test".into()),
            location: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("description").is_none());
        assert_eq!(value["website"], "https://acme.test");
    }
}
