//! Empty state component renderer.
//!
//! Shown in place of the job table when the latest fetch returned nothing.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;
use std::io::{self, Write};

/// Writes the empty-state message and subtitle, centered within `cols`.
pub fn render_empty_state(out: &mut impl Write, empty: &EmptyState, theme: &Theme, cols: usize) -> io::Result<()> {
    let center = |text: &str| " ".repeat(cols.saturating_sub(text.chars().count()) / 2);

    writeln!(out)?;
    writeln!(
        out,
        "{}{}{}{}{}",
        center(&empty.message),
        theme.bold(),
        theme.fg(&theme.colors.empty_state_fg),
        empty.message,
        theme.reset()
    )?;
    writeln!(
        out,
        "{}{}{}{}",
        center(&empty.subtitle),
        theme.fg(&theme.colors.text_dim),
        empty.subtitle,
        theme.reset()
    )?;
    writeln!(out)
}
