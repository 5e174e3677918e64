//! Tracing initialization and subscriber setup.

use crate::Config;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Initializes the global tracing subscriber.
///
/// # Parameters
///
/// * `config` - Client configuration containing the `trace_level` option
///
/// # File Location
///
/// Records are appended to [`crate::infrastructure::log_file`]. The data
/// directory is created if needed.
///
/// # Initialization Behavior
///
/// - Falls back to stderr when the log file cannot be opened
/// - Idempotent: safe to call multiple times (only the first call takes effect)
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    });

    let log_file = crate::infrastructure::log_file();
    let registry = tracing_subscriber::registry().with(filter);

    match open_log_file(&log_file) {
        Ok(file) => {
            let layer = fmt::layer().with_ansi(false).with_target(true).with_writer(Mutex::new(file));
            if registry.with(layer).try_init().is_ok() {
                tracing::debug!(log_file = %log_file.display(), "tracing initialized");
            }
        }
        Err(e) => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            if registry.with(layer).try_init().is_ok() {
                tracing::warn!(log_file = %log_file.display(), error = %e, "log file unavailable, logging to stderr");
            }
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
