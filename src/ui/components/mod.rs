//! Composable UI component renderers.
//!
//! Each component writes one part of the interface to any [`std::io::Write`],
//! so the same code renders to stdout and to buffers in tests.
//!
//! # Components
//!
//! - `header`: Title bar and subtitle
//! - `filters`: Active filters and skill picker
//! - `table`: Job rows with salary, metadata and tags
//! - `empty`: Empty state message for no results
//! - `footer`: Command hints
//! - `detail`: Single job, company and tag catalog views

mod detail;
mod empty;
mod filters;
mod footer;
mod header;
mod table;

pub use detail::{render_company_detail, render_company_list, render_job_detail, render_tag_list};
pub use empty::render_empty_state;
pub use filters::render_filter_bar;
pub use footer::render_footer;
pub use header::render_header;
pub use table::render_job_rows;

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Writes a horizontal separator line.
pub fn render_border(out: &mut impl Write, theme: &Theme, cols: usize) -> io::Result<()> {
    writeln!(out, "{}{}{}", theme.fg(&theme.colors.border), "─".repeat(cols), theme.reset())
}
