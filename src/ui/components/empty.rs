//! Empty state component renderer.
//!
//! Shown on the search page before the first search completes.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;
use std::fmt::{self, Write};

/// Renders the placeholder message and its subtitle, indented under the prompt.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "    {}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.text_normal),
        empty.message,
        Theme::reset()
    )?;
    writeln!(out, "    {}{}{}", Theme::fg(&theme.colors.text_dim), empty.subtitle, Theme::reset())
}
