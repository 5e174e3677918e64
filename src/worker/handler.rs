//! Worker implementation for asynchronous backend operations.
//!
//! The [`Worker`] is shared between tasks spawned by the runtime; each message is
//! handled on its own task so a long ingest never delays a search or a health
//! check. All errors are turned into response variants here.

use crate::api::{Backend, BackendHealth};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::workflow::{IngestOrchestrator, SearchClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Executes [`WorkerMessage`]s against the workflow components.
pub struct Worker {
    orchestrator: IngestOrchestrator,
    search: SearchClient,
    backend: Arc<dyn Backend>,
    timeout: Duration,
}

impl Worker {
    /// Creates a worker whose every backend call is bounded by `timeout`.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, timeout: Duration) -> Self {
        Self {
            orchestrator: IngestOrchestrator::new(Arc::clone(&backend), timeout),
            search: SearchClient::new(Arc::clone(&backend), timeout),
            backend,
            timeout,
        }
    }

    /// Cancels the in-flight ingest, if any.
    pub fn cancel_ingest(&self) {
        self.orchestrator.cancel();
    }

    #[must_use]
    pub fn is_ingesting(&self) -> bool {
        self.orchestrator.is_running()
    }

    /// Logs the health check result and converts it into a response.
    fn handle_health_result(result: Result<BackendHealth>) -> WorkerResponse {
        match result {
            Ok(health) => {
                tracing::debug!(status = %health.status, ready = health.ready, "health check succeeded");
                WorkerResponse::HealthChecked { health: Some(health) }
            }
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                WorkerResponse::HealthChecked { health: None }
            }
        }
    }

    async fn handle_health(&self) -> WorkerResponse {
        let result = match tokio::time::timeout(self.timeout, self.backend.health()).await {
            Ok(result) => result,
            Err(_) => Err(crate::domain::PhotoFindrError::TimedOut { endpoint: "/health".to_string() }),
        };
        Self::handle_health_result(result)
    }

    /// Processes a worker message and returns the response for the controller.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);

        async move {
            match message {
                WorkerMessage::Ingest { folder_link } => {
                    let outcome = self.orchestrator.run(&folder_link).await;
                    WorkerResponse::IngestFinished { outcome }
                }
                WorkerMessage::Search { query, ticket } => {
                    let reply = self.search.search(&query).await;
                    WorkerResponse::SearchFinished {
                        ticket,
                        query: query.as_str().to_string(),
                        reply,
                    }
                }
                WorkerMessage::CheckHealth => self.handle_health().await,
            }
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("orchestrator", &self.orchestrator)
            .field("search", &self.search)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBackend;
    use crate::domain::{FolderLink, IngestOutcome, SearchQuery};

    fn worker(backend: MockBackend) -> Worker {
        Worker::new(Arc::new(backend), Duration::from_secs(5))
    }

    #[test]
    fn debug_output_names_components() {
        let rendered = format!("{:?}", worker(MockBackend::new()));
        assert!(rendered.starts_with("Worker"));
        assert!(rendered.contains("IngestOrchestrator"));
        assert!(rendered.contains("SearchClient"));
    }

    #[tokio::test]
    async fn ingest_message_reports_outcome() {
        let worker = worker(MockBackend::new().with_images(MockBackend::sample_images(2)));
        let folder_link = FolderLink::parse("https://drive.google.com/drive/folders/ABC").unwrap();

        let response = worker.handle_message(WorkerMessage::Ingest { folder_link }).await;
        assert_eq!(
            response,
            WorkerResponse::IngestFinished { outcome: IngestOutcome::Completed { count: 2 } }
        );
        assert!(!worker.is_ingesting());
    }

    #[tokio::test]
    async fn search_message_echoes_ticket_and_query() {
        let worker = worker(MockBackend::new().with_search_results(Some(vec![])));
        let query = SearchQuery::parse("group photo").unwrap();

        let response = worker.handle_message(WorkerMessage::Search { query, ticket: 7 }).await;
        let WorkerResponse::SearchFinished { ticket, query, reply } = response else {
            panic!("unexpected response: {response:?}");
        };
        assert_eq!(ticket, 7);
        assert_eq!(query, "group photo");
        assert!(reply.photos.is_empty());
        assert!(reply.failure.is_none());
    }

    #[tokio::test]
    async fn health_check_maps_unreachable_to_none() {
        let unreachable = worker(MockBackend::new());
        assert_eq!(
            unreachable.handle_message(WorkerMessage::CheckHealth).await,
            WorkerResponse::HealthChecked { health: None }
        );

        let loading = BackendHealth { status: "healthy".to_string(), ready: false };
        let reachable = worker(MockBackend::new().with_health(loading.clone()));
        assert_eq!(
            reachable.handle_message(WorkerMessage::CheckHealth).await,
            WorkerResponse::HealthChecked { health: Some(loading) }
        );
    }
}
