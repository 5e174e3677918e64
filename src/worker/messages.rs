//! Worker message types for controller-to-executor communication.
//!
//! This module defines the request and response protocol between the
//! controller, which owns all UI state, and the async worker that performs
//! backend calls. Responses carry already-classified results so the controller
//! never sees a raw error.

use crate::api::BackendHealth;
use crate::domain::{FolderLink, IngestOutcome, SearchQuery};
use crate::workflow::SearchReply;

/// Requests sent from the controller to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Run the ingest pipeline for a folder link.
    Ingest {
        /// Validated folder link.
        folder_link: FolderLink,
    },

    /// Run one search.
    Search {
        /// Validated query.
        query: SearchQuery,

        /// Sequence number issued by the controller; echoed in the response so
        /// that stale replies can be discarded.
        ticket: u64,
    },

    /// Ask the backend whether its models are loaded.
    CheckHealth,
}

/// Responses sent from the worker back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// The ingest pipeline reached a terminal outcome.
    IngestFinished {
        outcome: IngestOutcome,
    },

    /// A search completed, successfully or not.
    SearchFinished {
        /// Ticket of the originating request.
        ticket: u64,
        /// The query as sent.
        query: String,
        reply: SearchReply,
    },

    /// Health check result; `None` when the backend could not be reached.
    HealthChecked {
        health: Option<BackendHealth>,
    },
}
