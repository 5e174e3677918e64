//! Backend abstraction.
//!
//! This module defines the [`Backend`] trait that abstracts over the remote
//! PhotoFindr service. The workflow layer depends only on this trait, which keeps
//! the orchestration logic testable without a running server.
//!
//! # Design Philosophy
//!
//! The trait mirrors the backend's endpoints one to one. It does not retry, time
//! out, or classify failures: those policies belong to the callers in
//! [`crate::workflow`].

use crate::domain::error::Result;
use crate::domain::{CaptionedImage, FolderLink, ImageRef, Photo, SearchQuery};
use async_trait::async_trait;
use serde::Deserialize;

/// Readiness report returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    /// `false` while the captioning and embedding models are still loading.
    #[serde(default)]
    pub ready: bool,
}

/// Abstraction over the remote photo service.
///
/// Implementations must be shareable across tasks; every method performs exactly
/// one request.
///
/// # Implementations
///
/// - [`crate::api::HttpBackend`]: reqwest client against the real service
/// - [`crate::api::MockBackend`]: scripted in-memory backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Lists the images in a shared folder.
    ///
    /// A missing or null `images` field yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    async fn fetch_drive_images(&self, link: &FolderLink) -> Result<Vec<ImageRef>>;

    /// Requests a caption for every image.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    async fn generate_captions(&self, images: &[ImageRef]) -> Result<Vec<CaptionedImage>>;

    /// Persists captioned images in the backend's store. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    async fn store_photos(&self, photos: &[CaptionedImage]) -> Result<()>;

    /// Runs a semantic search. Results keep the backend's order.
    ///
    /// A missing or null `results` field yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    async fn search_photos(&self, query: &SearchQuery) -> Result<Vec<Photo>>;

    /// Reports whether the backend's models are loaded.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unreachable.
    async fn health(&self) -> Result<BackendHealth>;
}
