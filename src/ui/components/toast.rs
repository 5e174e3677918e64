//! Notification component renderer.

use crate::domain::Severity;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;
use std::fmt::{self, Write};

const fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "i",
        Severity::Success => "✓",
        Severity::Error => "✗",
    }
}

/// Renders one notification line colored by severity.
pub fn render_toast(out: &mut String, toast: &ToastInfo, theme: &Theme) -> fmt::Result {
    writeln!(
        out,
        "{}{}[{}] {}{}",
        Theme::bold(),
        Theme::fg(theme.severity_color(toast.severity)),
        icon(toast.severity),
        toast.message,
        Theme::reset()
    )
}
