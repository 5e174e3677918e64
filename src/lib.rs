//! PhotoFindr: a terminal client for natural-language photo search.
//!
//! The client lets a user paste a shared Google Drive folder link, asks the
//! PhotoFindr backend to list, caption, and index the images in it, and later
//! searches the indexed photos with everyday descriptions. All heavy lifting
//! (folder traversal, captioning, embeddings, similarity search) happens in the
//! backend; this crate is the orchestration and presentation layer.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//!  main.rs ── stdin lines ──▶ app::parse_line ──▶ app::handle_event
//!     ▲                                              │        │
//!     │ render                                       │        │ Action::PostToWorker
//!  ui::render ◀── AppState::compute_viewmodel ◀──────┘        ▼
//!     │                                                  worker::Worker
//!  ui::theme                                                  │
//!                                         workflow::{IngestOrchestrator, SearchClient}
//!                                                             │
//!                                                api::Backend (HTTP or mock)
//!
//!  domain/          value types, outcomes, notifications, errors
//!  infrastructure/  config and log file locations
//!  observability/   tracing subscriber
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller state machine with event/action model
//! - [`api`]: Backend trait, HTTP client, and scriptable mock
//! - [`domain`]: Value types, outcomes, notifications, errors
//! - [`infrastructure`]: Platform paths
//! - [`workflow`]: Ingest pipeline and search client
//! - [`worker`]: Async executor protocol
//! - [`ui`]: Text rendering with light/dark themes
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. TOML file at `$PHOTOFINDR_CONFIG` or `<config dir>/photofindr/config.toml`
//! 3. Environment: `PHOTOFINDR_BACKEND_URL` (or the legacy `VITE_BACKEND_URL`),
//!    `PHOTOFINDR_TIMEOUT_SECS`, `PHOTOFINDR_THEME`, `PHOTOFINDR_TRACE_LEVEL`
//!
//! ```toml
//! backend_url = "http://localhost:5000"
//! request_timeout_secs = 120
//! notification_ttl_ms = 4000
//! theme = "dark"
//! theme_file = "/path/to/theme.toml"
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use photofindr::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::SubmitSearch("beach sunset".into()));
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;
pub mod workflow;

pub use app::{handle_event, parse_line, Action, AppState, Event, Page};
pub use domain::{PhotoFindrError, Result};
pub use ui::{Theme, ThemeMode, ThemeStore};

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_NOTIFICATION_TTL_MS: u64 = 4000;
const DEFAULT_THEME: &str = "light";

/// Environment variables and the configuration keys they set. Later entries win.
const ENV_KEYS: [(&str, &str); 5] = [
    ("VITE_BACKEND_URL", "backend_url"),
    ("PHOTOFINDR_BACKEND_URL", "backend_url"),
    ("PHOTOFINDR_TIMEOUT_SECS", "request_timeout_secs"),
    ("PHOTOFINDR_THEME", "theme"),
    ("PHOTOFINDR_TRACE_LEVEL", "trace_level"),
];

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the PhotoFindr backend. Default: `http://localhost:5000`
    pub backend_url: String,

    /// Upper bound for every backend call, in seconds. Default: 120
    pub request_timeout_secs: u64,

    /// How long a notification stays visible, in milliseconds. Default: 4000
    pub notification_ttl_ms: u64,

    /// Starting theme mode: `light` or `dark`. Default: `"light"`
    pub theme: String,

    /// Path to a custom TOML theme that replaces the starting palette.
    ///
    /// See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter such as `debug` or `photofindr=trace`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            theme: DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from the config file (if present) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or the
    /// resulting backend URL is not an absolute http(s) URL.
    pub fn load() -> Result<Self> {
        let mut config = match infrastructure::config_file() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        let env: BTreeMap<String, String> = std::env::vars().collect();
        config.apply_env(&env);
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML text on top of the defaults.
    ///
    /// Values of the wrong type are ignored like malformed numbers, so a bad
    /// entry never prevents the client from starting.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoFindrError::Config`] if the text is not valid TOML.
    ///
    /// # Example
    ///
    /// ```rust
    /// use photofindr::Config;
    ///
    /// let config = Config::from_toml_str("request_timeout_secs = 30\ntheme = \"dark\"").unwrap();
    /// assert_eq!(config.request_timeout_secs, 30);
    /// assert_eq!(config.theme, "dark");
    /// assert_eq!(config.backend_url, "http://localhost:5000");
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e| PhotoFindrError::Config(format!("invalid config file: {e}")))?;

        let values: BTreeMap<String, String> = table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        let mut config = Self::default();
        config.merge(&values);
        Ok(config)
    }

    /// Applies environment overrides from a variable map.
    ///
    /// `PHOTOFINDR_BACKEND_URL` takes precedence over the legacy
    /// `VITE_BACKEND_URL`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use photofindr::Config;
    ///
    /// let mut env = BTreeMap::new();
    /// env.insert("VITE_BACKEND_URL".to_string(), "http://10.0.0.2:5000".to_string());
    /// env.insert("PHOTOFINDR_TIMEOUT_SECS".to_string(), "not-a-number".to_string());
    ///
    /// let mut config = Config::default();
    /// config.apply_env(&env);
    /// assert_eq!(config.backend_url, "http://10.0.0.2:5000");
    /// assert_eq!(config.request_timeout_secs, 120);
    /// ```
    pub fn apply_env(&mut self, env: &BTreeMap<String, String>) {
        let mut values = BTreeMap::new();
        for (var, key) in ENV_KEYS {
            if let Some(value) = env.get(var).filter(|v| !v.trim().is_empty()) {
                values.insert(key.to_string(), value.clone());
            }
        }
        self.merge(&values);
    }

    /// Overwrites fields present in `values`, keeping the current value for
    /// numbers that do not parse as a positive integer.
    fn merge(&mut self, values: &BTreeMap<String, String>) {
        let positive = |key: &str| {
            values.get(key).and_then(|s| {
                let parsed = s.trim().parse::<u64>().ok().filter(|n| *n > 0);
                if parsed.is_none() {
                    tracing::debug!(key = key, value = %s, "ignoring malformed numeric setting");
                }
                parsed
            })
        };

        if let Some(url) = values.get("backend_url") {
            self.backend_url = url.trim().to_string();
        }
        if let Some(secs) = positive("request_timeout_secs") {
            self.request_timeout_secs = secs;
        }
        if let Some(ms) = positive("notification_ttl_ms") {
            self.notification_ttl_ms = ms;
        }
        if let Some(theme) = values.get("theme") {
            self.theme = theme.trim().to_string();
        }
        if let Some(theme_file) = values.get("theme_file") {
            self.theme_file = Some(theme_file.clone());
        }
        if let Some(level) = values.get("trace_level") {
            self.trace_level = Some(level.clone());
        }
    }

    /// Checks that the backend URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoFindrError::Config`] describing the problem.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend_url)
            .map_err(|e| PhotoFindrError::Config(format!("invalid backend URL {:?}: {e}", self.backend_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PhotoFindrError::Config(format!(
                "backend URL must use http or https: {}",
                self.backend_url
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Starting theme mode; unknown names fall back to light.
    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        ThemeMode::from_name(&self.theme).unwrap_or_else(|| {
            tracing::debug!(theme = %self.theme, "unknown theme mode, using light");
            ThemeMode::Light
        })
    }
}

/// Creates the initial controller state from configuration.
///
/// A `theme_file` that cannot be loaded is logged and the built-in palette is
/// used instead.
///
/// # Example
///
/// ```rust
/// use photofindr::{initialize, Config, Page, ThemeMode};
///
/// let config = Config { theme: "dark".to_string(), ..Default::default() };
/// let state = initialize(&config);
/// assert_eq!(state.page, Page::Home);
/// assert_eq!(state.theme.mode(), ThemeMode::Dark);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(backend_url = %config.backend_url, "initializing photofindr client");

    let mode = config.theme_mode();
    let store = ThemeStore::new(mode);
    let store = match config.theme_file.as_deref().map(Theme::from_file) {
        Some(Ok(theme)) => store.with_custom(mode, theme),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to load theme file, using built-in theme");
            store
        }
        None => store,
    };

    AppState::new(store, config.notification_ttl())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_match_backend_contract() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.notification_ttl(), Duration::from_millis(4000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend_url = \"http://file:5000\"\nrequest_timeout_secs = 30").unwrap();

        let mut config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.backend_url, "http://file:5000");

        config.apply_env(&env(&[
            ("VITE_BACKEND_URL", "http://legacy:5000"),
            ("PHOTOFINDR_BACKEND_URL", "https://photos.example.com"),
            ("PHOTOFINDR_THEME", "dark"),
        ]));
        assert_eq!(config.backend_url, "https://photos.example.com");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.theme_mode(), ThemeMode::Dark);
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        let config = Config::from_toml_str("request_timeout_secs = \"soon\"\nnotification_ttl_ms = 0").unwrap();
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.notification_ttl_ms, 4000);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(Config::from_toml_str("backend_url = "), Err(PhotoFindrError::Config(_))));
    }

    #[test]
    fn backend_url_must_be_absolute_http() {
        for bad in ["localhost:5000", "ftp://files.example.com", "not a url"] {
            let config = Config { backend_url: bad.to_string(), ..Config::default() };
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn missing_theme_file_falls_back_to_builtin() {
        let config = Config {
            theme_file: Some("/definitely/not/here.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.current().name, "light");
    }
}
