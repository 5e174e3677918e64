//! The three-step ingest pipeline.
//!
//! [`IngestOrchestrator::run`] lists a shared folder, captions every image it
//! found, and asks the backend to store the captioned results. The steps run
//! strictly in sequence; each step's output is the next step's entire input and
//! lives only for the duration of one run. There is no retry, no partial
//! persistence, and no rollback of earlier steps on the backend.
//!
//! # Guarantees
//!
//! - At most one run is in flight per orchestrator. A concurrent call returns
//!   [`IngestFailure::AlreadyRunning`] without touching the backend.
//! - Every step is bounded by the configured timeout.
//! - [`IngestOrchestrator::cancel`] stops the outstanding step; later steps never run.
//! - A failed step prevents every later step from being invoked.

use crate::api::Backend;
use crate::domain::{
    CaptionedImage, FailureKind, FolderLink, ImageRef, IngestFailure, IngestOutcome, IngestStep,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;
use tracing::Instrument;

type StepResult<T> = std::result::Result<T, IngestFailure>;

/// Clears the in-flight flag when dropped, on every exit path of a run.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one folder link through fetch, caption, and store.
///
/// # Examples
///
/// ```
/// use photofindr::api::MockBackend;
/// use photofindr::domain::{FolderLink, IngestOutcome};
/// use photofindr::workflow::IngestOrchestrator;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let backend = Arc::new(MockBackend::new().with_images(MockBackend::sample_images(3)));
/// let orchestrator = IngestOrchestrator::new(backend, Duration::from_secs(5));
/// let link = FolderLink::parse("https://drive.google.com/drive/folders/ABC").unwrap();
///
/// let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
/// let outcome = runtime.block_on(orchestrator.run(&link));
/// assert_eq!(outcome, IngestOutcome::Completed { count: 3 });
/// ```
pub struct IngestOrchestrator {
    backend: Arc<dyn Backend>,
    timeout: Duration,
    in_flight: AtomicBool,
    cancel: Notify,
}

impl IngestOrchestrator {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            in_flight: AtomicBool::new(false),
            cancel: Notify::new(),
        }
    }

    /// Returns `true` while a run is outstanding.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Cancels the outstanding run, if any.
    ///
    /// Has no effect when nothing is running; a later run is not affected.
    pub fn cancel(&self) {
        if self.is_running() {
            tracing::debug!("cancelling in-flight ingest");
            self.cancel.notify_waiters();
        }
    }

    /// Runs the pipeline for `link` and returns its single terminal outcome.
    pub async fn run(&self, link: &FolderLink) -> IngestOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(folder_link = %link, "ingest rejected, another run is in flight");
            return IngestOutcome::Failed(IngestFailure::AlreadyRunning);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let span = tracing::info_span!("ingest", folder_link = %link);
        let outcome = match self.run_pipeline(link).instrument(span).await {
            Ok(outcome) | Err(outcome) => outcome,
        };

        tracing::info!(outcome = ?outcome, "ingest finished");
        outcome
    }

    async fn run_pipeline(&self, link: &FolderLink) -> std::result::Result<IngestOutcome, IngestOutcome> {
        let cancelled = self.cancel.notified();
        tokio::pin!(cancelled);
        // Register before the first await so an early cancel is not lost.
        cancelled.as_mut().enable();

        let images: Vec<ImageRef> = self
            .step(
                IngestStep::FetchImages,
                self.backend.fetch_drive_images(link),
                cancelled.as_mut(),
            )
            .await
            .map_err(IngestOutcome::Failed)?;

        if images.is_empty() {
            tracing::info!("folder contains no images");
            return Ok(IngestOutcome::NoImages);
        }
        let count = images.len();

        let captions: Vec<CaptionedImage> = self
            .step(
                IngestStep::GenerateCaptions,
                self.backend.generate_captions(&images),
                cancelled.as_mut(),
            )
            .await
            .map_err(IngestOutcome::Failed)?;
        drop(images);

        if captions.len() != count {
            tracing::debug!(fetched = count, captioned = captions.len(), "caption count differs from image count");
        }

        self.step(
            IngestStep::StorePhotos,
            self.backend.store_photos(&captions),
            cancelled.as_mut(),
        )
        .await
        .map_err(IngestOutcome::Failed)?;

        Ok(IngestOutcome::Completed { count })
    }

    /// Awaits one backend call under the timeout, racing it against cancellation.
    async fn step<T, F>(
        &self,
        step: IngestStep,
        call: F,
        cancelled: Pin<&mut Notified<'_>>,
    ) -> StepResult<T>
    where
        F: Future<Output = crate::domain::Result<T>>,
    {
        tracing::debug!(step = %step, "ingest step started");

        let result = tokio::select! {
            biased;
            () = cancelled => Err(IngestFailure::Cancelled { step }),
            result = tokio::time::timeout(self.timeout, call) => match result {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => {
                    tracing::warn!(step = %step, error = %e, "ingest step failed");
                    Err(IngestFailure::from_error(step, &e))
                }
                Err(_) => {
                    tracing::warn!(step = %step, timeout_secs = self.timeout.as_secs(), "ingest step timed out");
                    Err(IngestFailure::Step { step, kind: FailureKind::TimedOut })
                }
            },
        };

        if result.is_ok() {
            tracing::debug!(step = %step, "ingest step succeeded");
        }
        result
    }
}

impl std::fmt::Debug for IngestOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestOrchestrator")
            .field("timeout", &self.timeout)
            .field("in_flight", &self.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BackendCall, MockBackend, MockFailure};

    const TIMEOUT: Duration = Duration::from_secs(120);

    fn link() -> FolderLink {
        FolderLink::parse("https://drive.google.com/drive/folders/ABC").unwrap()
    }

    fn orchestrator(backend: &Arc<MockBackend>) -> IngestOrchestrator {
        IngestOrchestrator::new(backend.clone(), TIMEOUT)
    }

    #[tokio::test]
    async fn successful_run_calls_each_step_once_in_order() {
        let backend = Arc::new(MockBackend::new().with_images(MockBackend::sample_images(3)));
        let outcome = orchestrator(&backend).run(&link()).await;

        assert_eq!(outcome, IngestOutcome::Completed { count: 3 });
        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::FetchDriveImages { link: link().to_string() },
                BackendCall::GenerateCaptions { images: 3 },
                BackendCall::StorePhotos { photos: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn success_count_is_images_fetched_not_captioned() {
        let caption = CaptionedImage {
            file_name: Some("IMG_0000.jpg".to_string()),
            drive_link: Some("https://drive.google.com/file/d/file-0/view".to_string()),
            caption: "a lighthouse on a cliff".to_string(),
            extra: serde_json::Map::new(),
        };
        let backend = Arc::new(
            MockBackend::new()
                .with_images(MockBackend::sample_images(3))
                .with_captions(vec![caption]),
        );
        let outcome = orchestrator(&backend).run(&link()).await;

        assert_eq!(outcome, IngestOutcome::Completed { count: 3 });
        assert_eq!(backend.calls().last(), Some(&BackendCall::StorePhotos { photos: 1 }));
    }

    #[tokio::test]
    async fn empty_folder_stops_after_fetch() {
        let backend = Arc::new(MockBackend::new());
        let outcome = orchestrator(&backend).run(&link()).await;

        assert_eq!(outcome, IngestOutcome::NoImages);
        assert_eq!(backend.step_calls(IngestStep::GenerateCaptions), 0);
        assert_eq!(backend.step_calls(IngestStep::StorePhotos), 0);
    }

    #[tokio::test]
    async fn failure_at_each_step_skips_later_steps() {
        let steps = [IngestStep::FetchImages, IngestStep::GenerateCaptions, IngestStep::StorePhotos];

        for (index, failing) in steps.iter().copied().enumerate() {
            let backend = Arc::new(
                MockBackend::new()
                    .with_images(MockBackend::sample_images(2))
                    .failing(failing, MockFailure::Status(500)),
            );
            let outcome = orchestrator(&backend).run(&link()).await;

            assert_eq!(outcome.message(), failing.failure_message());
            for later in &steps[index + 1..] {
                assert_eq!(backend.step_calls(*later), 0, "{later} ran after {failing} failed");
            }
        }
    }

    #[tokio::test]
    async fn transport_failure_is_classified() {
        let backend = Arc::new(MockBackend::new().failing(IngestStep::FetchImages, MockFailure::Transport));
        let outcome = orchestrator(&backend).run(&link()).await;

        assert_eq!(
            outcome,
            IngestOutcome::Failed(IngestFailure::Step {
                step: IngestStep::FetchImages,
                kind: FailureKind::Transport,
            })
        );
        assert_eq!(outcome.message(), "Failed to fetch Drive images");
    }

    #[tokio::test(start_paused = true)]
    async fn hung_step_times_out_with_distinct_reason() {
        let backend = Arc::new(
            MockBackend::new()
                .with_images(MockBackend::sample_images(1))
                .failing(IngestStep::StorePhotos, MockFailure::Hang),
        );
        let orchestrator = orchestrator(&backend);
        let outcome = orchestrator.run(&link()).await;

        assert_eq!(outcome.message(), "Timed out while storing photos");
        assert!(!orchestrator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn second_run_while_in_flight_is_rejected() {
        let backend = Arc::new(
            MockBackend::new()
                .with_images(MockBackend::sample_images(1))
                .failing(IngestStep::GenerateCaptions, MockFailure::Hang),
        );
        let orchestrator = orchestrator(&backend);

        let link = link();
        let (first, second) = tokio::join!(orchestrator.run(&link), orchestrator.run(&link));

        assert_eq!(second, IngestOutcome::Failed(IngestFailure::AlreadyRunning));
        assert_eq!(first.message(), "Timed out while generating captions");
        assert_eq!(backend.step_calls(IngestStep::FetchImages), 1);

        // The flag is released once the first run ends.
        let third = orchestrator.run(&link).await;
        assert_ne!(third, IngestOutcome::Failed(IngestFailure::AlreadyRunning));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_outstanding_step() {
        let backend = Arc::new(
            MockBackend::new()
                .with_images(MockBackend::sample_images(2))
                .failing(IngestStep::GenerateCaptions, MockFailure::Hang),
        );
        let orchestrator = orchestrator(&backend);

        let link = link();
        let (outcome, ()) = tokio::join!(orchestrator.run(&link), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            orchestrator.cancel();
        });

        assert_eq!(
            outcome,
            IngestOutcome::Failed(IngestFailure::Cancelled { step: IngestStep::GenerateCaptions })
        );
        assert_eq!(outcome.message(), "Import cancelled");
        assert_eq!(backend.step_calls(IngestStep::StorePhotos), 0);
        assert!(!orchestrator.is_running());
    }

    #[tokio::test]
    async fn cancel_without_run_does_not_affect_next_run() {
        let backend = Arc::new(MockBackend::new().with_images(MockBackend::sample_images(1)));
        let orchestrator = orchestrator(&backend);

        orchestrator.cancel();
        assert_eq!(orchestrator.run(&link()).await, IngestOutcome::Completed { count: 1 });
    }
}
