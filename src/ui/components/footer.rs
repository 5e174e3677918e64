//! Footer component renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::fmt::{self, Write};

/// Renders the command hints in the dimmed text color.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme) -> fmt::Result {
    writeln!(
        out,
        "{}{}{}{}",
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        footer.keybindings,
        Theme::reset()
    )
}
