//! The controller: UI state, the events that change it, and the actions it emits.
//!
//! This module is the controller of the client. It sits between the host
//! runtime (main.rs) and the worker, and owns every piece of UI state.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! Input line → Event → handle_event → State Mutations → Actions → Side Effects
//!                           ↑                                         ↓
//!                           └──────────── Worker Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transitions
//! - [`input`]: Terminal line to event mapping
//! - [`modes`]: Page and backend status types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use photofindr::app::{handle_event, AppState, Event, Page};
//!
//! let mut state = AppState::default();
//! let (redraw, actions) = handle_event(&mut state, &Event::Navigate(Page::Search));
//! assert!(redraw);
//! assert!(actions.is_empty());
//! ```

pub mod actions;
pub mod handler;
pub mod input;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use input::parse_line;
pub use modes::{BackendStatus, Page};
pub use state::{AppState, SearchPanel};
