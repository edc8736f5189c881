//! Footer component renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Writes the dimmed command hint line.
pub fn render_footer(out: &mut impl Write, footer: &FooterInfo, theme: &Theme) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{}{}",
        theme.dim(),
        theme.fg(&theme.colors.text_dim),
        footer.keybindings,
        theme.reset()
    )
}
