//! Scriptable in-memory backend for development and testing.
//!
//! [`MockBackend`] answers every call from scripted data and records the calls
//! it receives, in order. Each step can be told to fail with a status code, a
//! transport error, or to hang forever (for timeout and cancellation tests).

use super::backend::{Backend, BackendHealth};
use crate::domain::error::{PhotoFindrError, Result};
use crate::domain::{CaptionedImage, FolderLink, ImageRef, IngestStep, Photo, SearchQuery};
use async_trait::async_trait;
use serde_json::Map;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// One recorded call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    FetchDriveImages { link: String },
    GenerateCaptions { images: usize },
    StorePhotos { photos: usize },
    SearchPhotos { query: String },
    Health,
}

/// Scripted failure mode for a mocked call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Respond with this non-success HTTP status.
    Status(u16),
    /// Fail as if the connection were refused.
    Transport,
    /// Never respond.
    Hang,
}

impl MockFailure {
    async fn raise<T>(self, endpoint: &str) -> Result<T> {
        match self {
            Self::Status(status) => Err(PhotoFindrError::Status {
                endpoint: endpoint.to_string(),
                status,
            }),
            Self::Transport => Err(PhotoFindrError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Self::Hang => std::future::pending().await,
        }
    }
}

/// In-memory [`Backend`] with scripted responses.
///
/// Captions default to one entry per image, captioned `"a photo of <file name>"`.
///
/// # Example
///
/// ```
/// use photofindr::api::{Backend, BackendCall, MockBackend, MockFailure};
/// use photofindr::domain::{FolderLink, IngestStep};
///
/// # tokio_test_block(async {
/// let backend = MockBackend::new()
///     .with_images(MockBackend::sample_images(2))
///     .failing(IngestStep::GenerateCaptions, MockFailure::Status(500));
///
/// let link = FolderLink::parse("https://drive.google.com/drive/folders/ABC").unwrap();
/// assert_eq!(backend.fetch_drive_images(&link).await.unwrap().len(), 2);
/// assert_eq!(backend.calls().len(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    images: Vec<ImageRef>,
    captions: Option<Vec<CaptionedImage>>,
    search_results: Option<Vec<Photo>>,
    health: Option<BackendHealth>,
    step_failures: HashMap<IngestStep, MockFailure>,
    search_failure: Option<MockFailure>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds `count` image references shaped like the Drive listing output.
    #[must_use]
    pub fn sample_images(count: usize) -> Vec<ImageRef> {
        (0..count)
            .map(|i| ImageRef {
                file_name: Some(format!("IMG_{i:04}.jpg")),
                file_id: Some(format!("file-{i}")),
                drive_link: Some(format!("https://drive.google.com/file/d/file-{i}/view")),
                direct_link: Some(format!("https://drive.google.com/uc?export=view&id=file-{i}")),
                extra: Map::new(),
            })
            .collect()
    }

    #[must_use]
    pub fn with_images(mut self, images: Vec<ImageRef>) -> Self {
        self.images = images;
        self
    }

    #[must_use]
    pub fn with_captions(mut self, captions: Vec<CaptionedImage>) -> Self {
        self.captions = Some(captions);
        self
    }

    /// Scripts the `results` field of search responses. `None` answers `null`.
    #[must_use]
    pub fn with_search_results(mut self, results: Option<Vec<Photo>>) -> Self {
        self.search_results = results;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: BackendHealth) -> Self {
        self.health = Some(health);
        self
    }

    #[must_use]
    pub fn failing(mut self, step: IngestStep, failure: MockFailure) -> Self {
        self.step_failures.insert(step, failure);
        self
    }

    #[must_use]
    pub fn failing_search(mut self, failure: MockFailure) -> Self {
        self.search_failure = Some(failure);
        self
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of calls received for one ingest step.
    pub fn step_calls(&self, step: IngestStep) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (step, call),
                    (IngestStep::FetchImages, BackendCall::FetchDriveImages { .. })
                        | (IngestStep::GenerateCaptions, BackendCall::GenerateCaptions { .. })
                        | (IngestStep::StorePhotos, BackendCall::StorePhotos { .. })
                )
            })
            .count()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }

    fn default_captions(images: &[ImageRef]) -> Vec<CaptionedImage> {
        images
            .iter()
            .map(|image| CaptionedImage {
                file_name: image.file_name.clone(),
                drive_link: image.drive_link.clone(),
                caption: format!("a photo of {}", image.file_name.as_deref().unwrap_or("something")),
                extra: Map::new(),
            })
            .collect()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_drive_images(&self, link: &FolderLink) -> Result<Vec<ImageRef>> {
        self.record(BackendCall::FetchDriveImages { link: link.to_string() });
        if let Some(failure) = self.step_failures.get(&IngestStep::FetchImages) {
            return failure.raise(IngestStep::FetchImages.endpoint()).await;
        }
        Ok(self.images.clone())
    }

    async fn generate_captions(&self, images: &[ImageRef]) -> Result<Vec<CaptionedImage>> {
        self.record(BackendCall::GenerateCaptions { images: images.len() });
        if let Some(failure) = self.step_failures.get(&IngestStep::GenerateCaptions) {
            return failure.raise(IngestStep::GenerateCaptions.endpoint()).await;
        }
        Ok(self
            .captions
            .clone()
            .unwrap_or_else(|| Self::default_captions(images)))
    }

    async fn store_photos(&self, photos: &[CaptionedImage]) -> Result<()> {
        self.record(BackendCall::StorePhotos { photos: photos.len() });
        if let Some(failure) = self.step_failures.get(&IngestStep::StorePhotos) {
            return failure.raise(IngestStep::StorePhotos.endpoint()).await;
        }
        Ok(())
    }

    async fn search_photos(&self, query: &SearchQuery) -> Result<Vec<Photo>> {
        self.record(BackendCall::SearchPhotos { query: query.to_string() });
        if let Some(failure) = self.search_failure {
            return failure.raise("/api/search").await;
        }
        Ok(self.search_results.clone().unwrap_or_default())
    }

    async fn health(&self) -> Result<BackendHealth> {
        self.record(BackendCall::Health);
        self.health.clone().map_or_else(
            || {
                Err(PhotoFindrError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )))
            },
            Ok,
        )
    }
}
