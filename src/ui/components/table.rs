//! Job table component renderer.
//!
//! Each job takes up to three lines: title with salary, a dimmed metadata line,
//! and the tag chips.
//!
//! ```text
//!   #12 Rust Developer                              $50,000 - $90,000
//!       Acme · Berlin · full-time · 3 days ago
//!       [Rust] [Tokio]
//! ```

use crate::ui::helpers::{truncate, write_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::JobRow;
use std::io::{self, Write};

/// Columns reserved for the `#id ` prefix.
const ID_WIDTH: usize = 6;

/// Writes all job rows.
pub fn render_job_rows(out: &mut impl Write, rows: &[JobRow], theme: &Theme, cols: usize) -> io::Result<()> {
    for row in rows {
        render_job_row(out, row, theme, cols)?;
    }
    Ok(())
}

fn render_job_row(out: &mut impl Write, row: &JobRow, theme: &Theme, cols: usize) -> io::Result<()> {
    let id = format!("#{}", row.id);
    write!(out, "{}{id:>w$}{} ", theme.fg(&theme.colors.text_dim), theme.reset(), w = ID_WIDTH - 1)?;

    write!(out, "{}{}", theme.bold(), theme.fg(&theme.colors.accent))?;
    write_highlighted_text(out, &row.title, &row.highlight_ranges, theme)?;
    write!(out, "{}", theme.reset())?;

    let used = ID_WIDTH + row.title.chars().count();
    let salary_len = row.salary.chars().count();
    let gap = cols.saturating_sub(used + salary_len).max(2);
    writeln!(
        out,
        "{}{}{}{}",
        " ".repeat(gap),
        theme.fg(&theme.colors.salary_fg),
        row.salary,
        theme.reset()
    )?;

    let mut meta = vec![row.company.as_str()];
    if !row.location.is_empty() {
        meta.push(&row.location);
    }
    meta.push(&row.job_type);
    meta.push(&row.posted);
    let meta = truncate(&meta.join(" · "), cols.saturating_sub(ID_WIDTH));
    writeln!(out, "{}{}{meta}{}", " ".repeat(ID_WIDTH), theme.fg(&theme.colors.text_dim), theme.reset())?;

    if !row.tags.is_empty() {
        write!(out, "{}", " ".repeat(ID_WIDTH))?;
        for tag in &row.tags {
            write!(out, "{}[{tag}]{} ", theme.fg(&theme.colors.tag_fg), theme.reset())?;
        }
        writeln!(out)?;
    }
    Ok(())
}
