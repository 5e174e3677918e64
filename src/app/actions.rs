//! Actions representing side effects to be executed by the host runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing user input or worker responses. Actions
//! bridge pure state transitions and effectful operations like backend calls
//! and timers.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several side effects can be queued atomically. The host executes them in
//! order.
//!
//! # Example
//!
//! ```rust
//! use photofindr::app::Action;
//! use photofindr::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::CheckHealth)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands representing side effects to be executed by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a request to the async worker. The response comes back as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Cancels the in-flight ingest in the worker.
    CancelIngest,

    /// Sends [`Event::DismissNotification`](crate::app::Event::DismissNotification)
    /// for `id` once `after` has elapsed.
    ScheduleDismiss {
        /// Notification to dismiss.
        id: u64,
        /// Delay before dismissal.
        after: Duration,
    },

    /// Stops the host loop.
    Quit,
}
