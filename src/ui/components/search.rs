//! Search page renderer: query form, status line, and results.

use super::empty::render_empty_state;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, SearchView};
use std::fmt::{self, Write};

const BAR_CELLS: usize = 10;

/// Renders the search page.
pub fn render_search(out: &mut String, view: &SearchView, theme: &Theme) -> fmt::Result {
    let colors = &theme.colors;

    writeln!(out, "{}{}{}", Theme::fg(&colors.text_dim), view.prompt, Theme::reset())?;
    writeln!(
        out,
        "{}>{} {}",
        Theme::fg(&colors.accent),
        Theme::reset(),
        view.query.as_deref().unwrap_or_default()
    )?;

    if let Some(empty) = &view.empty_state {
        return render_empty_state(out, empty, theme);
    }

    if let Some(status) = &view.status_line {
        writeln!(out)?;
        writeln!(out, "{}{}{}", Theme::fg(&colors.text_dim), status, Theme::reset())?;
    }

    for (index, item) in view.items.iter().enumerate() {
        render_result(out, index + 1, item, theme)?;
    }
    Ok(())
}

/// Renders one result as a caption line followed by its links.
///
/// ```text
///  1. a beach at sunset  █████████░ 92%
///     https://drive.google.com/file/d/.../view
///     preview: https://drive.google.com/uc?export=view&id=...
/// ```
fn render_result(out: &mut String, rank: usize, item: &DisplayItem, theme: &Theme) -> fmt::Result {
    let colors = &theme.colors;

    writeln!(out)?;
    write!(out, "{rank:>2}. {}{}{}", Theme::fg(&colors.text_normal), item.caption, Theme::reset())?;
    if let Some(similarity) = &item.similarity {
        let filled = item.similarity_cells.min(BAR_CELLS);
        write!(
            out,
            "  {}{}{} {}{}",
            Theme::fg(&colors.similarity_fg),
            "█".repeat(filled),
            "░".repeat(BAR_CELLS - filled),
            similarity,
            Theme::reset()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "    {}{}{}", Theme::fg(&colors.link_fg), item.drive_link, Theme::reset())?;
    writeln!(
        out,
        "    {}preview: {}{}",
        Theme::fg(&colors.text_dim),
        item.preview_url,
        Theme::reset()
    )
}
