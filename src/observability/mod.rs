//! Structured logging setup.
//!
//! Every layer logs through `tracing` macros with structured fields. This module
//! installs the subscriber that decides where those records go: a plain-text
//! log file in the data directory, so the terminal UI on stdout stays clean.
//! When the file cannot be opened, records go to stderr instead.
//!
//! # Configuration
//!
//! The filter is resolved in this order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust,no_run
//! use photofindr::observability::init_tracing;
//! use photofindr::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("client initialized");
//! ```

mod init;

pub use init::init_tracing;
