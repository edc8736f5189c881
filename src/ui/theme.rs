//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for terminal output, supporting
//! built-in themes (Catppuccin variants) and custom themes loaded from TOML
//! files. It converts hex colors to 24-bit ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `monochrome`: No escape sequences at all (for pipes and logs)
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! accent = "#cba6f7"
//! tag_fg = "#94e2d5"
//! salary_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use jobboard::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}Bold Text{}", theme.bold(), theme.reset());
//! ```

use crate::domain::error::{JobBoardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CATPPUCCIN_MOCHA: &str = r##"
name = "catppuccin-mocha"

[colors]
header_fg = "#cdd6f4"
text_normal = "#cdd6f4"
text_dim = "#6c7086"
border = "#45475a"
accent = "#cba6f7"
tag_fg = "#94e2d5"
salary_fg = "#a6e3a1"
error_fg = "#f38ba8"
match_highlight_fg = "#1e1e2e"
match_highlight_bg = "#f9e2af"
empty_state_fg = "#89b4fa"
"##;

const CATPPUCCIN_LATTE: &str = r##"
name = "catppuccin-latte"

[colors]
header_fg = "#4c4f69"
header_bg = "#e6e9ef"
text_normal = "#4c4f69"
text_dim = "#9ca0b0"
border = "#bcc0cc"
accent = "#8839ef"
tag_fg = "#179299"
salary_fg = "#40a02b"
error_fg = "#d20f39"
match_highlight_fg = "#eff1f5"
match_highlight_bg = "#df8e1d"
empty_state_fg = "#1e66f5"
"##;

/// Color scheme configuration for terminal rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
    /// When set, every escape-sequence helper returns an empty string.
    #[serde(default)]
    pub monochrome: bool,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Filter labels and job titles.
    pub accent: String,
    /// Skill tag chips.
    pub tag_fg: String,
    /// Salary column.
    pub salary_fg: String,
    /// Error banners.
    pub error_fg: String,

    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => CATPPUCCIN_MOCHA,
            "catppuccin-latte" => CATPPUCCIN_LATTE,
            "monochrome" | "none" => return Some(Self::monochrome()),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| JobBoardError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| JobBoardError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// A theme that emits no escape sequences.
    #[must_use]
    pub fn monochrome() -> Self {
        let none = String::new;
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: none(),
                header_bg: None,
                text_normal: none(),
                text_dim: none(),
                border: none(),
                accent: none(),
                tag_fg: none(),
                salary_fg: none(),
                error_fg: none(),
                match_highlight_fg: none(),
                match_highlight_bg: none(),
                empty_state_fg: none(),
            },
            monochrome: true,
        }
    }

    /// Converts a hex color to an RGB tuple. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(&self, hex: &str) -> String {
        if self.monochrome {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(&self, hex: &str) -> String {
        if self.monochrome {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold(&self) -> &'static str {
        if self.monochrome { "" } else { "\u{001b}[1m" }
    }

    #[must_use]
    pub const fn dim(&self) -> &'static str {
        if self.monochrome { "" } else { "\u{001b}[2m" }
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset(&self) -> &'static str {
        if self.monochrome { "" } else { "\u{001b}[0m" }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::monochrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte", "monochrome"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
        assert!(!Theme::default().monochrome);
    }

    #[test]
    fn escape_sequences() {
        let theme = Theme::default();
        assert_eq!(theme.fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(theme.bg("bogus"), "\u{1b}[48;2;255;255;255m");

        let plain = Theme::monochrome();
        assert_eq!(plain.fg("#ff0080"), "");
        assert_eq!(plain.reset(), "");
    }

    #[test]
    fn custom_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        std::fs::write(&path, CATPPUCCIN_LATTE.replace("catppuccin-latte", "mine")).unwrap();
        assert_eq!(Theme::from_file(&path).unwrap().name, "mine");

        std::fs::write(&path, "name = 3").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(JobBoardError::Theme(_))));
    }
}
