//! End-to-end flows through the controller and worker against the mock backend.

use photofindr::api::{BackendCall, BackendHealth, MockBackend, MockFailure};
use photofindr::app::BackendStatus;
use photofindr::domain::{IngestStep, Photo, PhotoId, Severity};
use photofindr::ui::{render, PageView};
use photofindr::worker::{Worker, WorkerMessage};
use photofindr::{handle_event, Action, AppState, Event, Page};
use std::sync::Arc;
use std::time::Duration;

const FOLDER: &str = "https://drive.google.com/drive/folders/ABC";
const TIMEOUT: Duration = Duration::from_secs(120);

/// Feeds `event` to the controller and runs every resulting worker message to
/// completion, feeding responses back in. Returns the non-worker actions seen.
async fn drive(state: &mut AppState, worker: &Worker, event: Event) -> Vec<Action> {
    let mut pending = vec![event];
    let mut other = Vec::new();

    while let Some(event) = pending.pop() {
        let (_, actions) = handle_event(state, &event);
        for action in actions {
            match action {
                Action::PostToWorker(message) => {
                    let response = worker.handle_message(message).await;
                    pending.push(Event::WorkerResponse(response));
                }
                action => other.push(action),
            }
        }
    }
    other
}

fn photo(id: i64, caption: &str, similarity: f64) -> Photo {
    Photo {
        id: PhotoId::Number(id),
        drive_link: format!("https://drive.google.com/file/d/photo-{id:0>28}/view"),
        caption: caption.to_string(),
        similarity: Some(similarity),
    }
}

#[tokio::test]
async fn three_image_folder_is_ingested_and_page_switches_to_search() {
    let backend = Arc::new(MockBackend::new().with_images(MockBackend::sample_images(3)));
    let worker = Worker::new(backend.clone(), TIMEOUT);
    let mut state = AppState::default();

    let actions = drive(&mut state, &worker, Event::SubmitFolderLink(FOLDER.to_string())).await;

    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::FetchDriveImages { link: FOLDER.to_string() },
            BackendCall::GenerateCaptions { images: 3 },
            BackendCall::StorePhotos { photos: 3 },
        ]
    );
    assert!(!state.processing);
    assert_eq!(state.page, Page::Search);

    let notification = state.notification.as_ref().unwrap();
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.message, "Successfully processed 3 photos!");
    assert!(matches!(actions.as_slice(), [Action::ScheduleDismiss { .. }]));
}

#[tokio::test]
async fn empty_folder_stops_after_fetch() {
    let backend = Arc::new(MockBackend::new());
    let worker = Worker::new(backend.clone(), TIMEOUT);
    let mut state = AppState::default();

    drive(&mut state, &worker, Event::SubmitFolderLink(FOLDER.to_string())).await;

    assert_eq!(backend.calls().len(), 1);
    assert_eq!(state.page, Page::Home);
    assert!(!state.processing);
    let notification = state.notification.as_ref().unwrap();
    assert_eq!(notification.severity, Severity::Info);
    assert_eq!(notification.message, "No images found in the Drive folder");
}

#[tokio::test]
async fn caption_failure_skips_store_and_stays_home() {
    let backend = Arc::new(
        MockBackend::new()
            .with_images(MockBackend::sample_images(2))
            .failing(IngestStep::GenerateCaptions, MockFailure::Status(500)),
    );
    let worker = Worker::new(backend.clone(), TIMEOUT);
    let mut state = AppState::default();

    drive(&mut state, &worker, Event::SubmitFolderLink(FOLDER.to_string())).await;

    assert_eq!(backend.step_calls(IngestStep::StorePhotos), 0);
    assert_eq!(state.page, Page::Home);
    assert!(!state.processing);
    assert_eq!(
        state.notification.as_ref().unwrap().message,
        "Failed to generate captions"
    );
}

#[tokio::test]
async fn search_results_render_in_backend_order() {
    let backend = Arc::new(MockBackend::new().with_search_results(Some(vec![
        photo(1, "two people smiling at a wedding", 0.91),
        photo(2, "a dog on a beach", 0.42),
    ])));
    let worker = Worker::new(backend.clone(), TIMEOUT);
    let mut state = AppState::default();
    state.page = Page::Search;

    let actions = drive(&mut state, &worker, Event::SubmitSearch("people smiling".to_string())).await;

    assert!(actions.is_empty());
    assert!(state.notification.is_none());
    assert!(state.search.has_searched);
    assert!(!state.search.is_loading());

    let vm = state.compute_viewmodel(chrono::Utc::now());
    let PageView::Search(search) = vm.page else {
        panic!("expected search page");
    };
    assert_eq!(search.status_line.as_deref(), Some("Found 2 photos matching \"people smiling\""));
    assert_eq!(search.items[0].similarity.as_deref(), Some("91%"));
    assert_eq!(search.items[1].caption, "a dog on a beach");

    let screen = render(&state, chrono::Utc::now(), 80);
    assert!(screen.contains("two people smiling at a wedding"));
}

#[tokio::test]
async fn failed_search_shows_error_and_clears_results() {
    let backend = Arc::new(MockBackend::new().failing_search(MockFailure::Status(503)));
    let worker = Worker::new(backend, TIMEOUT);
    let mut state = AppState::default();
    state.page = Page::Search;
    state.search.results = vec![photo(9, "old result", 0.5)];

    drive(&mut state, &worker, Event::SubmitSearch("sunset".to_string())).await;

    assert!(state.search.results.is_empty());
    let notification = state.notification.as_ref().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Search failed. Please try again.");
}

#[tokio::test]
async fn stale_search_reply_is_discarded() {
    let backend = Arc::new(MockBackend::new().with_search_results(Some(vec![photo(1, "beach", 0.8)])));
    let worker = Worker::new(backend, TIMEOUT);
    let mut state = AppState::default();
    state.page = Page::Search;

    let (_, first) = handle_event(&mut state, &Event::SubmitSearch("beach".into()));
    let (_, second) = handle_event(&mut state, &Event::SubmitSearch("mountains".into()));

    let [Action::PostToWorker(first @ WorkerMessage::Search { .. })] = first.as_slice() else {
        panic!("expected a search message");
    };
    let [Action::PostToWorker(second @ WorkerMessage::Search { .. })] = second.as_slice() else {
        panic!("expected a search message");
    };

    let second_reply = worker.handle_message(second.clone()).await;
    let first_reply = worker.handle_message(first.clone()).await;

    let (redraw, _) = handle_event(&mut state, &Event::WorkerResponse(second_reply));
    assert!(redraw);
    assert_eq!(state.search.results.len(), 1);

    let (redraw, actions) = handle_event(&mut state, &Event::WorkerResponse(first_reply));
    assert!(!redraw);
    assert!(actions.is_empty());
    assert_eq!(state.search.query.as_deref(), Some("mountains"));
}

#[tokio::test]
async fn health_check_updates_header_status() {
    let backend = Arc::new(MockBackend::new().with_health(BackendHealth {
        status: "ok".to_string(),
        ready: false,
    }));
    let worker = Worker::new(backend, TIMEOUT);
    let mut state = AppState::default();

    let response = worker.handle_message(WorkerMessage::CheckHealth).await;
    handle_event(&mut state, &Event::WorkerResponse(response));

    assert_eq!(state.backend_status, BackendStatus::Loading);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_a_hanging_ingest() {
    let backend = Arc::new(
        MockBackend::new()
            .with_images(MockBackend::sample_images(1))
            .failing(IngestStep::GenerateCaptions, MockFailure::Hang),
    );
    let worker = Arc::new(Worker::new(backend.clone(), TIMEOUT));
    let mut state = AppState::default();

    let (_, actions) = handle_event(&mut state, &Event::SubmitFolderLink(FOLDER.to_string()));
    let [Action::PostToWorker(message)] = actions.as_slice() else {
        panic!("expected an ingest message");
    };

    let task = {
        let worker = Arc::clone(&worker);
        let message = message.clone();
        tokio::spawn(async move { worker.handle_message(message).await })
    };

    while backend.step_calls(IngestStep::GenerateCaptions) == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (_, actions) = handle_event(&mut state, &Event::CancelIngest);
    assert_eq!(actions, vec![Action::CancelIngest]);
    worker.cancel_ingest();

    let response = task.await.unwrap();
    handle_event(&mut state, &Event::WorkerResponse(response));

    assert!(!state.processing);
    assert_eq!(state.page, Page::Home);
    assert_eq!(backend.step_calls(IngestStep::StorePhotos), 0);
    assert_eq!(state.notification.as_ref().unwrap().message, "Import cancelled");
}
