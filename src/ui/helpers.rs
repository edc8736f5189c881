//! Shared rendering utilities and helpers.
//!
//! Formatting of salaries and counts, plus search-match highlighting with
//! proper ANSI escape sequence management. Highlight ranges are character
//! indices, never byte indices.

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Formats an integer with comma thousands separators.
///
/// ```
/// use jobboard::ui::helpers::format_thousands;
///
/// assert_eq!(format_thousands(1_234_567), "1,234,567");
/// assert_eq!(format_thousands(-950), "-950");
/// ```
#[must_use]
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a salary range for display. A bound of zero counts as absent.
///
/// ```
/// use jobboard::ui::helpers::format_salary;
///
/// assert_eq!(format_salary(Some(50_000), Some(90_000)), "$50,000 - $90,000");
/// assert_eq!(format_salary(Some(60_000), None), "From $60,000");
/// assert_eq!(format_salary(None, Some(0)), "Salary not specified");
/// ```
#[must_use]
pub fn format_salary(min: Option<i64>, max: Option<i64>) -> String {
    let min = min.filter(|v| *v != 0);
    let max = max.filter(|v| *v != 0);

    match (min, max) {
        (None, None) => "Salary not specified".to_string(),
        (None, Some(max)) => format!("Up to ${}", format_thousands(max)),
        (Some(min), None) => format!("From ${}", format_thousands(min)),
        (Some(min), Some(max)) => format!("${} - ${}", format_thousands(min), format_thousands(max)),
    }
}

/// Truncates `text` to at most `width` characters, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Writes `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` with exclusive ends. Ranges past the end of the
/// text are clipped.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_highlighted_text(
    out: &mut impl Write,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
) -> io::Result<()> {
    if ranges.is_empty() {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            write!(out, "{normal_section}")?;
        }

        let highlighted_section: String = chars[start..end].iter().collect();
        write!(
            out,
            "{}{}{highlighted_section}{}",
            theme.fg(&theme.colors.match_highlight_fg),
            theme.bg(&theme.colors.match_highlight_bg),
            theme.reset()
        )?;

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        write!(out, "{remaining}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(200_000), "200,000");
    }

    #[test]
    fn salary_variants() {
        assert_eq!(format_salary(None, None), "Salary not specified");
        assert_eq!(format_salary(Some(0), Some(0)), "Salary not specified");
        assert_eq!(format_salary(None, Some(120_000)), "Up to $120,000");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Zürich", 10), "Zürich");
        assert_eq!(truncate("Senior Engineer", 8), "Senior …");
    }

    #[test]
    fn highlight_marks_only_ranges() {
        let mut theme = Theme::monochrome();
        theme.monochrome = false;
        theme.colors.match_highlight_fg = "#000000".into();
        theme.colors.match_highlight_bg = "#ffffff".into();

        let mut out = Vec::new();
        write_highlighted_text(&mut out, "Rust Dev", &[(0, 4)], &theme).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(rendered, "\u{1b}[38;2;0;0;0m\u{1b}[48;2;255;255;255mRust\u{1b}[0m Dev");
    }

    #[test]
    fn highlight_clips_out_of_range() {
        let mut out = Vec::new();
        write_highlighted_text(&mut out, "Go", &[(1, 9), (5, 7)], &Theme::monochrome()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Go");
    }
}
