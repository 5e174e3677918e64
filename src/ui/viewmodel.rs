//! Plain data describing one frame of the screen.
//!
//! View models are computed from application state by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel) and
//! consumed by the renderer. They contain no business logic, only display-ready
//! strings, so every user-facing text can be asserted without rendering.
//!
//! # Example
//!
//! ```rust
//! use photofindr::app::AppState;
//! use photofindr::ui::viewmodel::PageView;
//! use std::time::Duration;
//!
//! let state = AppState::new(Default::default(), Duration::from_secs(4));
//! let vm = state.compute_viewmodel(chrono::Utc::now());
//! assert!(matches!(vm.page, PageView::Home(_)));
//! ```

use crate::app::Page;
use crate::domain::Severity;

/// Everything the components need to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Navbar information.
    pub header: HeaderInfo,

    /// Visible notification, if any.
    pub toast: Option<ToastInfo>,

    /// Body of the current page.
    pub page: PageView,

    /// Command hints.
    pub footer: FooterInfo,
}

/// Navbar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub active_page: Page,
    /// Backend readiness label (e.g. "backend ready").
    pub backend_status: String,
    /// Current theme mode name.
    pub theme: String,
}

/// A notification as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub severity: Severity,
    pub message: String,
}

/// Body of the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(HomeView),
    Search(SearchView),
}

/// Folder link form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub intro: String,
    pub prompt: String,
    /// Last submitted folder link.
    pub folder_link: Option<String>,
    /// "Process Photos" or "Processing Photos..." while an ingest is in flight.
    pub submit_label: String,
    pub processing: bool,
}

/// Query form and results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub prompt: String,
    /// Last submitted query.
    pub query: Option<String>,
    /// "Searching…", "Found N photos matching …" or "No results for …".
    pub status_line: Option<String>,
    /// Results in backend order.
    pub items: Vec<DisplayItem>,
    /// Placeholder shown before the first search.
    pub empty_state: Option<EmptyState>,
}

/// Display information for one search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub caption: String,

    /// Whole percentage such as "92%", absent when the backend sent no score.
    pub similarity: Option<String>,

    /// Filled cells of a ten-cell relevance bar.
    pub similarity_cells: usize,

    pub drive_link: String,

    /// Direct image URL derived from the Drive link.
    pub preview_url: String,
}

/// Key hints shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text (e.g. ":home  :search  :theme  :quit").
    pub keybindings: String,
}

/// Placeholder shown on the search page before the first query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g. "Ready to search").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
