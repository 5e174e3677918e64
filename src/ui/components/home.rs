//! Home page renderer: the folder link form.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::HomeView;
use std::fmt::{self, Write};

/// Renders the introduction, the last submitted link, and the submit control.
///
/// # Layout
///
/// ```text
/// Connect your Google Drive folder and search through ...
///
/// Paste your public Google Drive folder link
/// > https://drive.google.com/drive/folders/ABC
/// [ Processing Photos... ]
/// ```
pub fn render_home(out: &mut String, home: &HomeView, theme: &Theme) -> fmt::Result {
    let colors = &theme.colors;

    writeln!(out, "{}{}{}", Theme::fg(&colors.text_normal), home.intro, Theme::reset())?;
    writeln!(out)?;
    writeln!(out, "{}{}{}", Theme::fg(&colors.text_dim), home.prompt, Theme::reset())?;

    if let Some(link) = &home.folder_link {
        writeln!(out, "{}>{} {}", Theme::fg(&colors.accent), Theme::reset(), link)?;
    } else {
        writeln!(out, "{}>{}", Theme::fg(&colors.accent), Theme::reset())?;
    }

    let style = if home.processing { Theme::dim() } else { Theme::bold() };
    writeln!(out, "{}{}[ {} ]{}", style, Theme::fg(&colors.accent), home.submit_label, Theme::reset())
}
