//! Detail and catalog renderers for single records.
//!
//! Used by the one-shot CLI commands (`job`, `companies`, `company`, `tags`)
//! and by the browse loop's detail and company routes.

use crate::domain::{Company, Job, Tag};
use crate::ui::helpers::{format_salary, truncate};
use crate::ui::theme::Theme;
use chrono::{DateTime, Utc};
use std::io::{self, Write};

fn field(out: &mut impl Write, theme: &Theme, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{}{label:<10}{} {value}", theme.fg(&theme.colors.text_dim), theme.reset())
}

/// Writes every field of a job listing, including its description.
pub fn render_job_detail(out: &mut impl Write, job: &Job, theme: &Theme, now: DateTime<Utc>) -> io::Result<()> {
    writeln!(out, "{}{}{}{}", theme.bold(), theme.fg(&theme.colors.accent), job.title, theme.reset())?;
    field(out, theme, "Company", &job.company_name())?;
    field(out, theme, "Location", job.location.as_deref().unwrap_or("Not specified"))?;
    field(out, theme, "Type", &job.job_type)?;
    field(out, theme, "Level", &job.job_level)?;
    field(out, theme, "Salary", &format_salary(job.salary_min, job.salary_max))?;
    field(out, theme, "Posted", &job.posted_ago(now))?;
    if !job.is_active {
        writeln!(out, "{}This position is no longer accepting applications{}", theme.fg(&theme.colors.error_fg), theme.reset())?;
    }
    if !job.tags.is_empty() {
        let tags = job.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ");
        field(out, theme, "Skills", &tags)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", job.description)
}

/// Writes one line per company.
pub fn render_company_list(out: &mut impl Write, companies: &[Company], theme: &Theme, cols: usize) -> io::Result<()> {
    if companies.is_empty() {
        return writeln!(out, "{}No companies found{}", theme.fg(&theme.colors.empty_state_fg), theme.reset());
    }
    for company in companies {
        let verified = if company.is_verified { " ✓" } else { "" };
        let summary = format!(
            "{} · {} open position{}",
            company.location.as_deref().unwrap_or("Location not specified"),
            company.active_job_count(),
            if company.active_job_count() == 1 { "" } else { "s" }
        );
        writeln!(
            out,
            "{}#{:<4}{} {}{}{verified}{}  {}{}{}",
            theme.fg(&theme.colors.text_dim),
            company.id,
            theme.reset(),
            theme.bold(),
            company.company_name,
            theme.reset(),
            theme.fg(&theme.colors.text_dim),
            truncate(&summary, cols.saturating_sub(company.company_name.chars().count() + 10)),
            theme.reset()
        )?;
    }
    Ok(())
}

/// Writes a company profile and its active jobs.
pub fn render_company_detail(out: &mut impl Write, company: &Company, theme: &Theme) -> io::Result<()> {
    writeln!(out, "{}{}{}{}", theme.bold(), theme.fg(&theme.colors.accent), company.company_name, theme.reset())?;
    field(out, theme, "Location", company.location.as_deref().unwrap_or("Not specified"))?;
    if let Some(website) = &company.website {
        field(out, theme, "Website", website)?;
    }
    field(out, theme, "Verified", if company.is_verified { "yes" } else { "no" })?;
    if let Some(description) = &company.description {
        writeln!(out)?;
        writeln!(out, "{description}")?;
    }

    writeln!(out)?;
    writeln!(out, "{}Open positions ({}){}", theme.bold(), company.active_job_count(), theme.reset())?;
    for job in company.jobs.iter().filter(|j| j.is_active) {
        writeln!(
            out,
            "  #{:<4} {}  {}{} · {}{}",
            job.id,
            job.title,
            theme.fg(&theme.colors.text_dim),
            job.location.as_deref().unwrap_or("Remote"),
            job.job_type,
            theme.reset()
        )?;
    }
    Ok(())
}

/// Writes the tag vocabulary as a comma-separated list.
pub fn render_tag_list(out: &mut impl Write, tags: &[Tag], theme: &Theme) -> io::Result<()> {
    let names = tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ");
    writeln!(out, "{}{names}{}", theme.fg(&theme.colors.tag_fg), theme.reset())
}
