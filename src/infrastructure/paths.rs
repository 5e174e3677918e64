//! Platform path resolution.
//!
//! Locations follow the platform conventions reported by the `dirs` crate
//! (`~/.config` and `~/.local/share` on Linux). The configuration file can be
//! relocated with the `PHOTOFINDR_CONFIG` environment variable.

use std::path::PathBuf;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "PHOTOFINDR_CONFIG";

const APP_DIR: &str = "photofindr";

/// Returns the configuration file path.
///
/// `$PHOTOFINDR_CONFIG` wins when set and non-empty; otherwise the file is
/// `<config dir>/photofindr/config.toml`. Returns `None` when neither can be
/// determined.
///
/// # Examples
///
/// ```
/// use photofindr::infrastructure::config_file;
///
/// if let Some(path) = config_file() {
///     assert!(path.ends_with("config.toml") || std::env::var_os("PHOTOFINDR_CONFIG").is_some());
/// }
/// ```
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")))
}

/// Returns the data directory used for logs.
///
/// Falls back to the system temporary directory when the platform has no data
/// directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Returns the log file path inside [`data_dir`].
#[must_use]
pub fn log_file() -> PathBuf {
    data_dir().join("photofindr.log")
}
