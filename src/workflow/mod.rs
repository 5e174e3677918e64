//! Client-side orchestration of backend calls.
//!
//! Both components in this module catch every backend failure internally and
//! return an already-classified result. Nothing here returns a
//! [`PhotoFindrError`](crate::domain::PhotoFindrError) to its caller.
//!
//! # Components
//!
//! - [`IngestOrchestrator`]: the sequential fetch, caption, store pipeline with a
//!   single in-flight guard, per-step timeouts, and cancellation
//! - [`SearchClient`]: fail-soft semantic search

pub mod ingest;
pub mod search;

pub use ingest::IngestOrchestrator;
pub use search::{SearchClient, SearchReply, SEARCH_FAILED_MESSAGE};
