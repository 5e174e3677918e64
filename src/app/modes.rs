//! Page and backend status state types for the application.
//!
//! # State Machine
//!
//! The client shows one of two pages, freely navigable at any time, including
//! while an ingest is in flight:
//! - **Home**: folder link form that starts an ingest
//! - **Search**: query form and result list
//!
//! [`BackendStatus`] reflects the last health check and never gates either page.

use crate::api::BackendHealth;

/// The page currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Search,
}

impl Page {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Search => "Search",
        }
    }
}

/// Backend readiness as last reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    /// No health check has completed yet.
    #[default]
    Unknown,
    Ready,
    /// The backend answered but its models are still loading.
    Loading,
    Unreachable,
}

impl BackendStatus {
    /// Derives the status from a health check result (`None` when unreachable).
    #[must_use]
    pub fn from_health(health: Option<&BackendHealth>) -> Self {
        match health {
            Some(h) if h.ready => Self::Ready,
            Some(_) => Self::Loading,
            None => Self::Unreachable,
        }
    }

    /// Navbar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "checking backend",
            Self::Ready => "backend ready",
            Self::Loading => "models loading",
            Self::Unreachable => "backend unreachable",
        }
    }
}
