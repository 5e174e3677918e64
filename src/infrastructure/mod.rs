//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves the platform locations the client reads from and
//! writes to: the configuration file and the log directory.

pub mod paths;

pub use paths::{config_file, data_dir, log_file, CONFIG_ENV};
