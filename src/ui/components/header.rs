//! Navbar component renderer.
//!
//! Renders the application title, the page tabs with the active page
//! highlighted, the backend status, and the theme mode on one line.

use crate::app::Page;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::{self, Write};

/// Renders the navbar line.
///
/// # Layout
///
/// ```text
/// PhotoFindr   [Home]  Search   · backend ready · light
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme) -> fmt::Result {
    let colors = &theme.colors;

    if let Some(bg) = &colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    write!(out, "{}{}{}{}", Theme::bold(), Theme::fg(&colors.header_fg), header.title, Theme::reset())?;
    out.push_str("   ");

    for page in [Page::Home, Page::Search] {
        if page == header.active_page {
            write!(out, "{}{}[{}]{}  ", Theme::bold(), Theme::fg(&colors.accent), page.title(), Theme::reset())?;
        } else {
            write!(out, "{} {} {}  ", Theme::fg(&colors.text_dim), page.title(), Theme::reset())?;
        }
    }

    writeln!(
        out,
        " {}· {} · {}{}",
        Theme::fg(&colors.text_dim),
        header.backend_status,
        header.theme,
        Theme::reset()
    )
}
