//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors, and optional
//! background styling, followed by a dimmed subtitle line.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

/// Writes the header: a full-width centered title line and the subtitle.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
/// subtitle
/// ```
///
/// Padding is split evenly on both sides to center the title. If the width
/// cannot divide evenly, right padding is slightly larger.
pub fn render_header(out: &mut impl Write, header: &HeaderInfo, theme: &Theme, cols: usize) -> io::Result<()> {
    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    write!(out, "{}{}", theme.bold(), theme.fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", theme.bg(bg))?;
    }
    write!(out, "{}{}", " ".repeat(padding), header.title)?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + title_len)))?;
    writeln!(out, "{}", theme.reset())?;

    writeln!(out, "{}{}{}", theme.fg(&theme.colors.text_dim), header.subtitle, theme.reset())
}
