//! Filter bar component renderer.
//!
//! Shows the active filters as `Label: value` pairs and the skill picker with
//! selected skills marked.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;
use std::io::{self, Write};

/// Writes the active-filter line and the skill picker.
///
/// `tags_error` replaces the skill picker when the vocabulary failed to load.
pub fn render_filter_bar(
    out: &mut impl Write,
    bar: &FilterBarInfo,
    tags_error: Option<&str>,
    theme: &Theme,
) -> io::Result<()> {
    if bar.entries.is_empty() {
        writeln!(out, "{}No filters applied{}", theme.fg(&theme.colors.text_dim), theme.reset())?;
    } else {
        for (i, (label, value)) in bar.entries.iter().enumerate() {
            if i > 0 {
                write!(out, "  ")?;
            }
            write!(out, "{}{label}:{} {value}", theme.fg(&theme.colors.accent), theme.reset())?;
        }
        if bar.show_clear {
            write!(out, "  {}(clear to reset){}", theme.fg(&theme.colors.text_dim), theme.reset())?;
        }
        writeln!(out)?;
    }

    if let Some(error) = tags_error {
        return writeln!(out, "{}Skills unavailable: {error}{}", theme.fg(&theme.colors.error_fg), theme.reset());
    }
    if bar.skills.is_empty() {
        return Ok(());
    }

    write!(out, "{}Skills:{}", theme.fg(&theme.colors.text_dim), theme.reset())?;
    for skill in &bar.skills {
        if skill.selected {
            write!(out, " {}{}[x] {}{}", theme.bold(), theme.fg(&theme.colors.tag_fg), skill.name, theme.reset())?;
        } else {
            write!(out, " {}[ ] {}{}", theme.fg(&theme.colors.text_dim), skill.name, theme.reset())?;
        }
    }
    writeln!(out)
}
