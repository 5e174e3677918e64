//! State transitions for every controller event.
//!
//! This module implements the controller: [`handle_event`] takes the current
//! state and one event, mutates the state, and returns whether a redraw is
//! needed together with the side effects to execute.
//!
//! # Architecture
//!
//! 1. Events arrive from the input mapper, timers, or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on [`AppState`]
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `Navigate`, `ToggleTheme`
//! - **Forms**: `SubmitFolderLink`, `SubmitSearch`
//! - **Control**: `CancelIngest`, `DismissNotification`, `Quit`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use photofindr::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (redraw, actions) = handle_event(&mut state, &Event::SubmitFolderLink("   ".into()));
//! assert!(!redraw);
//! assert!(actions.is_empty());
//! ```

use super::modes::{BackendStatus, Page};
use crate::app::{Action, AppState};
use crate::domain::{FolderLink, IngestFailure, IngestOutcome, SearchQuery, Severity};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers, or worker responses.
///
/// The controller processes these sequentially, which makes every state
/// transition deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Shows a page. Allowed at any time, including during an ingest.
    Navigate(Page),

    /// Switches between the light and dark theme.
    ToggleTheme,

    /// Submits the folder link form. Blank input is ignored.
    SubmitFolderLink(String),

    /// Submits the search form. Blank input is ignored.
    SubmitSearch(String),

    /// Requests cancellation of the in-flight ingest.
    CancelIngest,

    /// Dismisses the notification with `id` if it is still shown.
    DismissNotification {
        id: u64,
    },

    /// Wraps a response from the worker.
    WorkerResponse(WorkerResponse),

    /// Exits the application.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(redraw, actions)`: whether the view changed, and the side effects to run in
/// order.
///
/// # Example
///
/// ```rust
/// use photofindr::app::{handle_event, Action, AppState, Event};
/// use photofindr::worker::WorkerMessage;
///
/// let mut state = AppState::default();
/// let (redraw, actions) = handle_event(
///     &mut state,
///     &Event::SubmitFolderLink("https://drive.google.com/drive/folders/ABC".into()),
/// );
/// assert!(redraw);
/// assert!(state.processing);
/// assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::Ingest { .. })));
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Navigate(page) => {
            if state.page == *page {
                return (false, vec![]);
            }
            tracing::debug!(from = ?state.page, to = ?page, "navigating");
            state.page = *page;
            (true, vec![])
        }
        Event::ToggleTheme => {
            let mode = state.theme.toggle();
            tracing::debug!(theme = %mode, "theme toggled");
            (true, vec![])
        }
        Event::SubmitFolderLink(raw) => handle_submit_folder_link(state, raw),
        Event::SubmitSearch(raw) => handle_submit_search(state, raw),
        Event::CancelIngest => {
            if state.processing {
                tracing::debug!("cancel requested for in-flight ingest");
                (false, vec![Action::CancelIngest])
            } else {
                tracing::debug!("cancel requested with no ingest in flight");
                (false, vec![])
            }
        }
        Event::DismissNotification { id } => {
            if state.dismiss_notification(*id) {
                (true, vec![])
            } else {
                tracing::trace!(notification_id = id, "stale dismissal ignored");
                (false, vec![])
            }
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
        Event::Quit => (false, vec![Action::Quit]),
    }
}

fn handle_submit_folder_link(state: &mut AppState, raw: &str) -> (bool, Vec<Action>) {
    let folder_link = match FolderLink::parse(raw) {
        Ok(link) => link,
        Err(e) => {
            tracing::debug!(error = %e, "folder link rejected");
            return (false, vec![]);
        }
    };

    if state.processing {
        tracing::debug!(folder_link = %folder_link, "submission refused, ingest in flight");
        let dismiss = state.notify(Severity::Info, IngestFailure::AlreadyRunning.to_string());
        return (true, vec![dismiss]);
    }

    tracing::info!(folder_link = %folder_link, "ingest submitted");
    state.processing = true;
    state.folder_link = Some(folder_link.to_string());

    (true, vec![Action::PostToWorker(WorkerMessage::Ingest { folder_link })])
}

fn handle_submit_search(state: &mut AppState, raw: &str) -> (bool, Vec<Action>) {
    let query = match SearchQuery::parse(raw) {
        Ok(query) => query,
        Err(e) => {
            tracing::debug!(error = %e, "search query rejected");
            return (false, vec![]);
        }
    };

    let ticket = state.search.issue_ticket();
    tracing::debug!(query = %query, ticket = ticket, "search submitted");
    state.search.query = Some(query.to_string());

    (true, vec![Action::PostToWorker(WorkerMessage::Search { query, ticket })])
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::IngestFinished { outcome } => {
            state.processing = false;

            if let IngestOutcome::Completed { count } = outcome {
                tracing::info!(count = count, "ingest completed, switching to search");
                state.page = Page::Search;
            }

            let dismiss = state.notify(outcome.severity(), outcome.message());
            (true, vec![dismiss])
        }
        WorkerResponse::SearchFinished { ticket, query, reply } => {
            if !state.search.is_current(*ticket) {
                tracing::debug!(ticket = ticket, query = %query, "discarding stale search response");
                return (false, vec![]);
            }

            state.search.pending_ticket = None;
            state.search.has_searched = true;
            state.search.results.clone_from(&reply.photos);
            tracing::debug!(result_count = reply.photos.len(), "search results applied");

            let actions = reply
                .failure
                .as_ref()
                .map(|message| state.notify(Severity::Error, message.clone()))
                .into_iter()
                .collect();
            (true, actions)
        }
        WorkerResponse::HealthChecked { health } => {
            let status = BackendStatus::from_health(health.as_ref());
            if status == state.backend_status {
                return (false, vec![]);
            }
            tracing::debug!(status = ?status, "backend status updated");
            state.backend_status = status;
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BackendHealth;
    use crate::domain::{FailureKind, IngestStep, Photo, PhotoId};
    use crate::workflow::{SearchReply, SEARCH_FAILED_MESSAGE};

    const LINK: &str = "https://drive.google.com/drive/folders/ABC";

    fn finished(outcome: IngestOutcome) -> Event {
        Event::WorkerResponse(WorkerResponse::IngestFinished { outcome })
    }

    fn search_finished(ticket: u64, query: &str, reply: SearchReply) -> Event {
        Event::WorkerResponse(WorkerResponse::SearchFinished {
            ticket,
            query: query.to_string(),
            reply,
        })
    }

    fn submitted_ticket(actions: &[Action]) -> u64 {
        match actions {
            [Action::PostToWorker(WorkerMessage::Search { ticket, .. })] => *ticket,
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    fn photo(caption: &str) -> Photo {
        Photo {
            id: PhotoId::Number(1),
            drive_link: "https://drive.google.com/file/d/abc/view".to_string(),
            caption: caption.to_string(),
            similarity: Some(0.5),
        }
    }

    #[test]
    fn successful_ingest_navigates_to_search() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));
        assert!(state.processing);

        let (redraw, actions) = handle_event(&mut state, &finished(IngestOutcome::Completed { count: 3 }));

        assert!(redraw);
        assert!(!state.processing);
        assert_eq!(state.page, Page::Search);
        let note = state.notification.as_ref().unwrap();
        assert_eq!(note.message, "Successfully processed 3 photos!");
        assert_eq!(note.severity, Severity::Success);
        assert_eq!(actions, vec![Action::ScheduleDismiss { id: note.id, after: state.notification_ttl }]);
    }

    #[test]
    fn empty_folder_stays_home_with_info() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));
        handle_event(&mut state, &finished(IngestOutcome::NoImages));

        assert_eq!(state.page, Page::Home);
        assert!(!state.processing);
        let note = state.notification.as_ref().unwrap();
        assert_eq!(note.severity, Severity::Info);
        assert_eq!(note.message, "No images found in the Drive folder");
    }

    #[test]
    fn failed_ingest_stays_home_with_error() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));
        handle_event(
            &mut state,
            &finished(IngestOutcome::Failed(IngestFailure::Step {
                step: IngestStep::GenerateCaptions,
                kind: FailureKind::Status(500),
            })),
        );

        assert_eq!(state.page, Page::Home);
        assert!(!state.processing);
        let note = state.notification.as_ref().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.message, "Failed to generate captions");
    }

    #[test]
    fn blank_submissions_are_ignored() {
        let mut state = AppState::default();
        assert_eq!(handle_event(&mut state, &Event::SubmitFolderLink("  \t".to_string())), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::SubmitSearch(String::new())), (false, vec![]));
        assert!(!state.processing);
        assert!(state.search.pending_ticket.is_none());
    }

    #[test]
    fn second_submission_while_processing_is_refused() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));

        let (_, actions) = handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));

        assert!(actions.iter().all(|a| !matches!(a, Action::PostToWorker(_))));
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some("An import is already in progress")
        );
    }

    #[test]
    fn navigation_is_allowed_during_ingest() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));

        let (redraw, _) = handle_event(&mut state, &Event::Navigate(Page::Search));
        assert!(redraw);
        assert_eq!(state.page, Page::Search);
        assert!(state.processing);

        let (redraw, _) = handle_event(&mut state, &Event::Navigate(Page::Search));
        assert!(!redraw);
    }

    #[test]
    fn search_results_replace_panel_without_changing_page() {
        let mut state = AppState::default();
        state.page = Page::Search;
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch(" beach sunset ".to_string()));
        let ticket = submitted_ticket(&actions);
        assert_eq!(state.search.query.as_deref(), Some("beach sunset"));

        let reply = SearchReply { photos: vec![photo("a beach at sunset")], failure: None };
        let (redraw, actions) = handle_event(&mut state, &search_finished(ticket, "beach sunset", reply));

        assert!(redraw);
        assert!(actions.is_empty());
        assert_eq!(state.page, Page::Search);
        assert!(state.search.has_searched);
        assert_eq!(state.search.results, vec![photo("a beach at sunset")]);
        assert!(state.notification.is_none());
    }

    #[test]
    fn failed_search_shows_error_and_empties_results() {
        let mut state = AppState::default();
        state.search.results = vec![photo("old")];
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch("xyz".to_string()));
        let ticket = submitted_ticket(&actions);

        let reply = SearchReply { photos: vec![], failure: Some(SEARCH_FAILED_MESSAGE.to_string()) };
        let (_, actions) = handle_event(&mut state, &search_finished(ticket, "xyz", reply));

        assert!(state.search.results.is_empty());
        assert!(state.search.has_searched);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Error);
        assert!(matches!(actions.as_slice(), [Action::ScheduleDismiss { .. }]));
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let mut state = AppState::default();
        let (_, first) = handle_event(&mut state, &Event::SubmitSearch("first".to_string()));
        let (_, second) = handle_event(&mut state, &Event::SubmitSearch("second".to_string()));
        let (first, second) = (submitted_ticket(&first), submitted_ticket(&second));

        let newer = SearchReply { photos: vec![photo("newer")], failure: None };
        handle_event(&mut state, &search_finished(second, "second", newer));

        let older = SearchReply { photos: vec![photo("older")], failure: Some(SEARCH_FAILED_MESSAGE.to_string()) };
        let (redraw, actions) = handle_event(&mut state, &search_finished(first, "first", older));

        assert!(!redraw);
        assert!(actions.is_empty());
        assert_eq!(state.search.results, vec![photo("newer")]);
        assert!(state.notification.is_none());
    }

    #[test]
    fn cancel_only_emitted_while_processing() {
        let mut state = AppState::default();
        assert_eq!(handle_event(&mut state, &Event::CancelIngest), (false, vec![]));

        handle_event(&mut state, &Event::SubmitFolderLink(LINK.to_string()));
        assert_eq!(handle_event(&mut state, &Event::CancelIngest), (false, vec![Action::CancelIngest]));

        handle_event(
            &mut state,
            &finished(IngestOutcome::Failed(IngestFailure::Cancelled { step: IngestStep::FetchImages })),
        );
        assert!(!state.processing);
        assert_eq!(state.notification.as_ref().unwrap().message, "Import cancelled");
    }

    #[test]
    fn health_check_updates_status_label() {
        let mut state = AppState::default();
        let health = BackendHealth { status: "healthy".to_string(), ready: true };

        let (redraw, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::HealthChecked { health: Some(health) }),
        );
        assert!(redraw);
        assert_eq!(state.backend_status, BackendStatus::Ready);

        handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::HealthChecked { health: None }));
        assert_eq!(state.backend_status.label(), "backend unreachable");
    }

    #[test]
    fn theme_toggle_and_quit() {
        let mut state = AppState::default();
        let before = state.theme.mode();
        assert!(handle_event(&mut state, &Event::ToggleTheme).0);
        assert_ne!(state.theme.mode(), before);

        assert_eq!(handle_event(&mut state, &Event::Quit), (false, vec![Action::Quit]));
    }
}
