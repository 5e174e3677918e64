//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single state container owned by the
//! controller, along with the [`SearchPanel`] sub-state and the view model
//! computation. State is mutated only by [`handle_event`](crate::app::handle_event),
//! one event at a time, so no locking is involved.
//!
//! # State Components
//!
//! - **Page**: which page is shown
//! - **Processing**: set while an ingest is in flight
//! - **Notification**: the most recent notification, if not yet dismissed
//! - **Search panel**: last query, results, "has searched" flag, pending ticket
//! - **Backend status**: last health check result
//! - **Theme**: light/dark preference
//!
//! # Example
//!
//! ```rust
//! use photofindr::app::{AppState, Page};
//! use photofindr::ui::theme::ThemeStore;
//! use std::time::Duration;
//!
//! let state = AppState::new(ThemeStore::default(), Duration::from_secs(4));
//! assert_eq!(state.page, Page::Home);
//! assert!(!state.processing);
//! ```

use super::modes::{BackendStatus, Page};
use super::Action;
use crate::domain::{Notification, Photo, Severity};
use crate::ui::theme::ThemeStore;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, HomeView, PageView, SearchView, ToastInfo,
    UIViewModel,
};
use chrono::{DateTime, Utc};
use std::time::Duration;

const APP_TITLE: &str = "PhotoFindr";
const SIMILARITY_BAR_CELLS: usize = 10;

/// Search page state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPanel {
    /// Last submitted query.
    pub query: Option<String>,

    /// Results of the latest completed search, in backend order.
    pub results: Vec<Photo>,

    /// Whether any search has completed. Gates the "Ready to search" placeholder.
    pub has_searched: bool,

    /// Ticket of the search whose response is awaited. Responses carrying any
    /// other ticket are stale.
    pub pending_ticket: Option<u64>,

    last_ticket: u64,
}

impl SearchPanel {
    /// Issues a fresh ticket and marks it as the one awaited.
    pub fn issue_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.pending_ticket = Some(self.last_ticket);
        self.last_ticket
    }

    /// Returns `true` if `ticket` belongs to the newest outstanding search.
    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.pending_ticket == Some(ticket)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_ticket.is_some()
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Page currently shown.
    pub page: Page,

    /// Set before the ingest request is posted and cleared when its outcome arrives.
    pub processing: bool,

    /// Last submitted folder link.
    pub folder_link: Option<String>,

    /// Most recent notification; replaced by newer ones.
    pub notification: Option<Notification>,

    pub search: SearchPanel,

    pub backend_status: BackendStatus,

    pub theme: ThemeStore,

    /// How long a notification stays visible.
    pub notification_ttl: Duration,

    next_notification_id: u64,
}

impl AppState {
    /// Creates the initial state: home page, idle, no notification.
    #[must_use]
    pub fn new(theme: ThemeStore, notification_ttl: Duration) -> Self {
        Self {
            page: Page::Home,
            processing: false,
            folder_link: None,
            notification: None,
            search: SearchPanel::default(),
            backend_status: BackendStatus::Unknown,
            theme,
            notification_ttl,
            next_notification_id: 0,
        }
    }

    /// `true` when no import or search is waiting on the backend.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.processing && !self.search.is_loading()
    }

    /// Replaces the current notification and returns the action that will
    /// dismiss it after the configured delay.
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) -> Action {
        self.next_notification_id += 1;
        let notification = Notification::new(self.next_notification_id, severity, message);
        tracing::debug!(
            notification_id = notification.id,
            severity = ?notification.severity,
            message = %notification.message,
            "notification raised"
        );

        let action = Action::ScheduleDismiss {
            id: notification.id,
            after: self.notification_ttl,
        };
        self.notification = Some(notification);
        action
    }

    /// Clears the notification if it is still the one with `id`.
    ///
    /// Returns `false` when a newer notification has replaced it.
    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            true
        } else {
            false
        }
    }

    /// Transforms state into a renderable view model.
    ///
    /// Notifications older than the TTL at `now` are hidden even if their
    /// dismissal has not been processed yet.
    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>) -> UIViewModel {
        let toast = self
            .notification
            .as_ref()
            .filter(|n| !n.is_expired(now, self.notification_ttl))
            .map(|n| ToastInfo {
                severity: n.severity,
                message: n.message.clone(),
            });

        let page = match self.page {
            Page::Home => PageView::Home(self.compute_home()),
            Page::Search => PageView::Search(self.compute_search()),
        };

        UIViewModel {
            header: self.compute_header(),
            toast,
            page,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: APP_TITLE.to_string(),
            active_page: self.page,
            backend_status: self.backend_status.label().to_string(),
            theme: self.theme.mode().to_string(),
        }
    }

    fn compute_home(&self) -> HomeView {
        let submit_label = if self.processing { "Processing Photos..." } else { "Process Photos" };

        HomeView {
            intro: "Connect your Google Drive folder and search through your photos using everyday descriptions."
                .to_string(),
            prompt: "Paste your public Google Drive folder link".to_string(),
            folder_link: self.folder_link.clone(),
            submit_label: submit_label.to_string(),
            processing: self.processing,
        }
    }

    fn compute_search(&self) -> SearchView {
        let panel = &self.search;
        let query = panel.query.clone().unwrap_or_default();

        let status_line = if panel.is_loading() {
            Some("Searching…".to_string())
        } else if !panel.has_searched {
            None
        } else if panel.results.is_empty() {
            Some(format!("No results for \"{query}\""))
        } else {
            let count = panel.results.len();
            let noun = if count == 1 { "photo" } else { "photos" };
            Some(format!("Found {count} {noun} matching \"{query}\""))
        };

        let empty_state = (!panel.has_searched && !panel.is_loading()).then(|| EmptyState {
            message: "Ready to search".to_string(),
            subtitle: "Try searching for things like \"person in front of church\", \"beach sunset\", or \"group photo\""
                .to_string(),
        });

        let items = if panel.is_loading() {
            Vec::new()
        } else {
            panel.results.iter().map(Self::compute_display_item).collect()
        };

        SearchView {
            prompt: "Describe what you're looking for in natural language".to_string(),
            query: panel.query.clone(),
            status_line,
            items,
            empty_state,
        }
    }

    fn compute_display_item(photo: &Photo) -> DisplayItem {
        let percent = photo.similarity_percent();

        DisplayItem {
            caption: photo.caption.clone(),
            similarity: percent.map(|p| format!("{p}%")),
            similarity_cells: percent.map_or(0, |p| {
                (usize::from(p) * SIMILARITY_BAR_CELLS + 50) / 100
            }),
            drive_link: photo.drive_link.clone(),
            preview_url: photo.preview_url(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.page, self.processing) {
            (Page::Home, false) => "type a folder link + Enter: process  :search  :theme  :quit",
            (Page::Home, true) => ":cancel: stop import  :search  :theme  :quit",
            (Page::Search, false) => "type a query + Enter: search  :home  :theme  :quit",
            (Page::Search, true) => "type a query + Enter: search  :home  :cancel  :theme  :quit",
        };

        let keybindings = if self.notification.is_some() {
            format!("{keybindings}  :dismiss")
        } else {
            keybindings.to_string()
        };

        FooterInfo { keybindings }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ThemeStore::default(), Duration::from_millis(4000))
    }
}
