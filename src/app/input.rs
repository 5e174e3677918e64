//! Maps lines of terminal input to controller events.
//!
//! Lines starting with `:` that name a known command are commands. Every other
//! non-blank line submits the form of the current page.

use super::handler::Event;
use super::modes::Page;
use super::state::AppState;

/// Translates one input line into an event, or `None` if it should be ignored.
///
/// # Example
///
/// ```rust
/// use photofindr::app::{parse_line, AppState, Event, Page};
///
/// let state = AppState::default();
/// assert_eq!(parse_line(":search", &state), Some(Event::Navigate(Page::Search)));
/// assert_eq!(parse_line("   ", &state), None);
/// ```
#[must_use]
pub fn parse_line(line: &str, state: &AppState) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line {
        ":home" | ":h" => Some(Event::Navigate(Page::Home)),
        ":search" | ":s" => Some(Event::Navigate(Page::Search)),
        ":theme" | ":t" => Some(Event::ToggleTheme),
        ":cancel" | ":c" => Some(Event::CancelIngest),
        ":quit" | ":q" => Some(Event::Quit),
        ":dismiss" | ":d" => {
            return state
                .notification
                .as_ref()
                .map(|n| Event::DismissNotification { id: n.id });
        }
        _ => None,
    };

    command.or_else(|| {
        Some(match state.page {
            Page::Home => Event::SubmitFolderLink(line.to_string()),
            Page::Search => Event::SubmitSearch(line.to_string()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    #[test]
    fn free_text_submits_current_page_form() {
        let mut state = AppState::default();
        assert_eq!(
            parse_line(" https://drive.google.com/drive/folders/ABC\n", &state),
            Some(Event::SubmitFolderLink("https://drive.google.com/drive/folders/ABC".to_string()))
        );

        state.page = Page::Search;
        assert_eq!(
            parse_line("group photo", &state),
            Some(Event::SubmitSearch("group photo".to_string()))
        );
    }

    #[test]
    fn commands_map_to_events() {
        let state = AppState::default();
        assert_eq!(parse_line(":home", &state), Some(Event::Navigate(Page::Home)));
        assert_eq!(parse_line(":theme", &state), Some(Event::ToggleTheme));
        assert_eq!(parse_line(":cancel", &state), Some(Event::CancelIngest));
        assert_eq!(parse_line(":q", &state), Some(Event::Quit));
    }

    #[test]
    fn dismiss_targets_current_notification() {
        let mut state = AppState::default();
        assert_eq!(parse_line(":dismiss", &state), None);

        state.notify(Severity::Info, "hello");
        let id = state.notification.as_ref().unwrap().id;
        assert_eq!(parse_line(":dismiss", &state), Some(Event::DismissNotification { id }));
    }
}
