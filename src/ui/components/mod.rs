//! Composable UI component renderers.
//!
//! Each component writes one part of the screen into a `String` buffer.
//!
//! # Components
//!
//! - [`header`]: Navbar with page tabs and backend status
//! - [`toast`]: Current notification
//! - [`home`]: Folder link form
//! - [`search`]: Query form, status line, and result list
//! - [`empty`]: "Ready to search" placeholder
//! - [`footer`]: Command hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Toast, when visible]
//! [Page body]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod home;
mod search;
mod toast;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageView, UIViewModel};
use std::fmt::{self, Write};

use footer::render_footer;
use header::render_header;
use home::render_home;
use search::render_search;
use toast::render_toast;

/// Renders a horizontal separator spanning `cols` columns.
fn render_border(out: &mut String, color: &str, cols: usize) -> fmt::Result {
    writeln!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}

/// Renders the full screen for a view model.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) -> fmt::Result {
    render_header(out, &vm.header, theme)?;
    render_border(out, &theme.colors.border, cols)?;

    if let Some(toast) = &vm.toast {
        render_toast(out, toast, theme)?;
        writeln!(out)?;
    }

    match &vm.page {
        PageView::Home(home) => render_home(out, home, theme)?,
        PageView::Search(search) => render_search(out, search, theme)?,
    }

    render_border(out, &theme.colors.border, cols)?;
    render_footer(out, &vm.footer, theme)
}
