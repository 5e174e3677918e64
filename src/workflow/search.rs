//! Fail-soft semantic search.

use crate::api::Backend;
use crate::domain::{Photo, SearchQuery};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Notice shown when a search could not be completed.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// Result of one search call.
///
/// A failed search degrades to an empty result set plus a user-facing notice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchReply {
    /// Matches in the order the backend returned them.
    pub photos: Vec<Photo>,
    /// Set when the call failed or timed out.
    pub failure: Option<String>,
}

/// Translates a query into matching photos. Holds no state between calls.
#[derive(Clone)]
pub struct SearchClient {
    backend: Arc<dyn Backend>,
    timeout: Duration,
}

impl SearchClient {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Searches for `query`. Never fails; see [`SearchReply`].
    ///
    /// Blank queries cannot reach this point because [`SearchQuery::parse`]
    /// rejects them.
    pub async fn search(&self, query: &SearchQuery) -> SearchReply {
        let span = tracing::debug_span!("search", query = %query);
        let result = tokio::time::timeout(self.timeout, self.backend.search_photos(query))
            .instrument(span)
            .await;

        match result {
            Ok(Ok(photos)) => {
                tracing::debug!(result_count = photos.len(), "search completed");
                SearchReply { photos, failure: None }
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "search failed");
                Self::failed()
            }
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "search timed out");
                Self::failed()
            }
        }
    }

    fn failed() -> SearchReply {
        SearchReply {
            photos: Vec::new(),
            failure: Some(SEARCH_FAILED_MESSAGE.to_string()),
        }
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient").field("timeout", &self.timeout).finish_non_exhaustive()
    }
}
