//! Entry point for turning application state into terminal text.
//!
//! Rendering happens in two passes:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Output is returned as a string so the host decides where it goes.
//!
//! # Example
//!
//! ```rust
//! use photofindr::app::AppState;
//! use photofindr::ui::render;
//!
//! let state = AppState::default();
//! let screen = render(&state, chrono::Utc::now(), 80);
//! assert!(screen.contains("Process Photos"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use chrono::{DateTime, Utc};

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders the current state as ANSI-styled text.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `now` - Wall-clock time used to hide expired notifications
/// * `cols` - Terminal width in columns
#[must_use]
pub fn render(state: &AppState, now: DateTime<Utc>, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(now);

    render_viewmodel(&viewmodel, state.theme.current(), cols)
}

/// Renders a pre-computed view model with the given theme.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = components::render_screen(&mut out, vm, theme, cols);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Page;
    use crate::domain::{Photo, PhotoId, Severity};

    #[test]
    fn home_page_shows_form_and_status() {
        let mut state = AppState::default();
        state.processing = true;
        state.folder_link = Some("https://drive.google.com/drive/folders/ABC".to_string());
        state.notify(Severity::Info, "No images found in the Drive folder");

        let screen = render(&state, Utc::now(), 60);
        assert!(screen.contains("PhotoFindr"));
        assert!(screen.contains("[Home]"));
        assert!(screen.contains("checking backend"));
        assert!(screen.contains("Processing Photos..."));
        assert!(screen.contains("https://drive.google.com/drive/folders/ABC"));
        assert!(screen.contains("No images found in the Drive folder"));
        assert!(screen.contains(":cancel"));
    }

    #[test]
    fn search_page_lists_results_with_links() {
        let mut state = AppState::default();
        state.page = Page::Search;
        state.search.query = Some("beach sunset".to_string());
        state.search.has_searched = true;
        state.search.results = vec![Photo {
            id: PhotoId::Number(1),
            drive_link: "https://drive.google.com/file/d/1aBcDeFgHiJkLmNoPqRsTuVwXyZ012345/view".to_string(),
            caption: "a beach at sunset".to_string(),
            similarity: Some(0.92),
        }];

        let screen = render(&state, Utc::now(), 60);
        assert!(screen.contains("[Search]"));
        assert!(screen.contains("Found 1 photo matching \"beach sunset\""));
        assert!(screen.contains(" 1. "));
        assert!(screen.contains("a beach at sunset"));
        assert!(screen.contains("92%"));
        assert!(screen.contains("https://drive.google.com/uc?export=view&id=1aBcDeFgHiJkLmNoPqRsTuVwXyZ012345"));
    }

    #[test]
    fn search_page_placeholder_before_first_search() {
        let mut state = AppState::default();
        state.page = Page::Search;
        let screen = render(&state, Utc::now(), 60);
        assert!(screen.contains("Ready to search"));
        assert!(screen.contains("\"person in front of church\""));
    }
}
