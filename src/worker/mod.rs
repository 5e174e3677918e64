//! Async worker for backend operations.
//!
//! The controller never awaits anything itself. It posts [`WorkerMessage`]s,
//! the host spawns [`Worker::handle_message`] for each one, and the resulting
//! [`WorkerResponse`] is fed back to the controller as an event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::Worker;
pub use messages::{WorkerMessage, WorkerResponse};
