//! Terminal outcomes of workflow runs and the notifications derived from them.
//!
//! An [`IngestOutcome`] is produced exactly once per ingest attempt and already
//! carries the user-facing classification: the controller never inspects raw
//! errors. A [`Notification`] is a short-lived message shown once and discarded.

use super::error::PhotoFindrError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// The three sequential steps of the ingest pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestStep {
    /// `POST /api/fetch-drive`
    FetchImages,
    /// `POST /api/caption`
    GenerateCaptions,
    /// `POST /api/store`
    StorePhotos,
}

impl IngestStep {
    /// Backend path called by this step.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::FetchImages => "/api/fetch-drive",
            Self::GenerateCaptions => "/api/caption",
            Self::StorePhotos => "/api/store",
        }
    }

    /// Reason reported when the step fails at the transport or status level.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::FetchImages => "Failed to fetch Drive images",
            Self::GenerateCaptions => "Failed to generate captions",
            Self::StorePhotos => "Failed to store photos",
        }
    }

    /// Reason reported when the step exceeds the request timeout.
    #[must_use]
    pub const fn timeout_message(self) -> &'static str {
        match self {
            Self::FetchImages => "Timed out while fetching Drive images",
            Self::GenerateCaptions => "Timed out while generating captions",
            Self::StorePhotos => "Timed out while storing photos",
        }
    }
}

impl fmt::Display for IngestStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchImages => "fetch-images",
            Self::GenerateCaptions => "generate-captions",
            Self::StorePhotos => "store-photos",
        };
        f.write_str(name)
    }
}

/// How a backend call failed, stripped of non-cloneable error payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, TLS, or body-read failure.
    Transport,
    /// Non-success HTTP status.
    Status(u16),
    /// The configured timeout elapsed.
    TimedOut,
    /// The response body could not be decoded.
    Malformed,
}

impl From<&PhotoFindrError> for FailureKind {
    fn from(err: &PhotoFindrError) -> Self {
        if err.is_timeout() {
            return Self::TimedOut;
        }
        match err {
            PhotoFindrError::Status { status, .. } => Self::Status(*status),
            PhotoFindrError::Http(e) if e.is_decode() => Self::Malformed,
            PhotoFindrError::Serialization(_) => Self::Malformed,
            _ => Self::Transport,
        }
    }
}

/// Why an ingest attempt did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestFailure {
    /// A pipeline step failed; later steps were not invoked.
    Step {
        step: IngestStep,
        kind: FailureKind,
    },
    /// The run was cancelled while `step` was outstanding.
    Cancelled { step: IngestStep },
    /// Another ingest was already in flight; nothing was sent.
    AlreadyRunning,
}

impl IngestFailure {
    /// Classifies a backend error raised by `step`.
    #[must_use]
    pub fn from_error(step: IngestStep, err: &PhotoFindrError) -> Self {
        if matches!(err, PhotoFindrError::Cancelled) {
            return Self::Cancelled { step };
        }
        Self::Step { step, kind: FailureKind::from(err) }
    }
}

impl fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step { step, kind: FailureKind::TimedOut } => f.write_str(step.timeout_message()),
            Self::Step { step, .. } => f.write_str(step.failure_message()),
            Self::Cancelled { .. } => f.write_str("Import cancelled"),
            Self::AlreadyRunning => f.write_str("An import is already in progress"),
        }
    }
}

/// Terminal result of one ingest attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// All three steps succeeded. `count` is the number of images fetched.
    Completed { count: usize },
    /// The folder listing succeeded but contained no images.
    NoImages,
    /// The pipeline stopped early.
    Failed(IngestFailure),
}

impl IngestOutcome {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Completed { .. } => Severity::Success,
            Self::NoImages => Severity::Info,
            Self::Failed(_) => Severity::Error,
        }
    }

    /// User-facing message for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Completed { count } => format!("Successfully processed {count} photos!"),
            Self::NoImages => "No images found in the Drive folder".to_string(),
            Self::Failed(failure) => failure.to_string(),
        }
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient, severity-tagged message for the user.
///
/// The `id` lets a delayed dismissal target exactly the notification it was
/// scheduled for; a newer notification is never cleared by an older timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    #[must_use]
    pub fn new(id: u64, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id,
            severity,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    /// Returns `true` once the notification has been visible for longer than `ttl`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        chrono::Duration::from_std(ttl)
            .map_or(false, |ttl| now.signed_duration_since(self.raised_at) > ttl)
    }
}
