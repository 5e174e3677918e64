//! reqwest-based implementation of the backend contract.

use super::backend::{Backend, BackendHealth};
use super::wire::{
    CaptionRequest, CaptionResponse, FetchDriveRequest, FetchDriveResponse, SearchResponse,
    StoreRequest,
};
use crate::domain::error::{PhotoFindrError, Result};
use crate::domain::{CaptionedImage, FolderLink, ImageRef, Photo, SearchQuery};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::Instrument;
use url::Url;

const FETCH_DRIVE_PATH: &str = "api/fetch-drive";
const CAPTION_PATH: &str = "api/caption";
const STORE_PATH: &str = "api/store";
const SEARCH_PATH: &str = "api/search";
const HEALTH_PATH: &str = "health";

/// HTTP client for the PhotoFindr backend.
///
/// Every request is bounded by the timeout given at construction. Endpoint paths
/// are resolved relative to the base URL, so a base such as
/// `https://example.com/photofindr` keeps its path prefix.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute `http`/`https` URL or the
    /// underlying client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use photofindr::api::HttpBackend;
    /// use std::time::Duration;
    ///
    /// let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(30)).unwrap();
    /// assert_eq!(backend.base_url().as_str(), "http://localhost:5000/");
    /// assert!(HttpBackend::new("ftp://files", Duration::from_secs(1)).is_err());
    /// ```
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PhotoFindrError::Config(format!(
                "backend URL must use http or https, got {}",
                base_url.scheme()
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("photofindr/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn classify(path: &str, err: reqwest::Error) -> PhotoFindrError {
        if err.is_timeout() {
            PhotoFindrError::TimedOut { endpoint: format!("/{path}") }
        } else {
            PhotoFindrError::Http(err)
        }
    }

    fn ensure_success(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        tracing::warn!(endpoint = %path, status = status.as_u16(), "backend returned error status");
        Err(PhotoFindrError::Status {
            endpoint: format!("/{path}"),
            status: status.as_u16(),
        })
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| Self::classify(path, e))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.endpoint(path)?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .instrument(tracing::debug_span!("backend_post", endpoint = %path))
            .await
            .map_err(|e| Self::classify(path, e))?;

        Self::ensure_success(path, response)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.endpoint(path)?;

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .instrument(tracing::debug_span!("backend_get", endpoint = %path))
            .await
            .map_err(|e| Self::classify(path, e))?;

        Self::ensure_success(path, response)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_drive_images(&self, link: &FolderLink) -> Result<Vec<ImageRef>> {
        let body = FetchDriveRequest { drive_link: link.as_str() };
        let response = self.post_json(FETCH_DRIVE_PATH, &body).await?;
        let decoded: FetchDriveResponse = Self::read_json(FETCH_DRIVE_PATH, response).await?;

        let images = decoded.images.unwrap_or_default();
        tracing::debug!(image_count = images.len(), "drive folder listed");
        Ok(images)
    }

    async fn generate_captions(&self, images: &[ImageRef]) -> Result<Vec<CaptionedImage>> {
        let response = self.post_json(CAPTION_PATH, &CaptionRequest { images }).await?;
        let decoded: CaptionResponse = Self::read_json(CAPTION_PATH, response).await?;

        let captions = decoded.captions.unwrap_or_default();
        tracing::debug!(caption_count = captions.len(), "captions generated");
        Ok(captions)
    }

    async fn store_photos(&self, photos: &[CaptionedImage]) -> Result<()> {
        self.post_json(STORE_PATH, &StoreRequest { photos }).await?;
        tracing::debug!(photo_count = photos.len(), "photos stored");
        Ok(())
    }

    async fn search_photos(&self, query: &SearchQuery) -> Result<Vec<Photo>> {
        let response = self.get(SEARCH_PATH, &[("query", query.as_str())]).await?;
        let decoded: SearchResponse = Self::read_json(SEARCH_PATH, response).await?;
        Ok(decoded.results.unwrap_or_default())
    }

    async fn health(&self) -> Result<BackendHealth> {
        let response = self.get(HEALTH_PATH, &[]).await?;
        Self::read_json(HEALTH_PATH, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path_prefix() {
        let backend = HttpBackend::new("https://example.com/photofindr", Duration::from_secs(5)).unwrap();
        assert_eq!(
            backend.endpoint(SEARCH_PATH).unwrap().as_str(),
            "https://example.com/photofindr/api/search"
        );

        let local = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            local.endpoint(FETCH_DRIVE_PATH).unwrap().as_str(),
            "http://localhost:5000/api/fetch-drive"
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        assert!(matches!(
            HttpBackend::new("localhost:5000", Duration::from_secs(5)),
            Err(PhotoFindrError::Config(_) | PhotoFindrError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Reserve a free port, then release it so connections are refused.
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let backend = HttpBackend::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(5)).unwrap();
        let link = FolderLink::parse("https://drive.google.com/drive/folders/ABC").unwrap();

        let err = backend.fetch_drive_images(&link).await.unwrap_err();
        assert!(matches!(err, PhotoFindrError::Http(_)), "unexpected error: {err:?}");
    }
}
