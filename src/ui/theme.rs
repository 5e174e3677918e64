//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color schemes used by the text renderer and the
//! [`ThemeStore`] that holds the process-wide light/dark preference. Palettes are
//! either built in (`light`, `dark`) or loaded from a custom TOML file.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#1f2937"
//! accent = "#2563eb"
//! text_normal = "#111827"
//! text_dim = "#6b7280"
//! border = "#d1d5db"
//! link_fg = "#1d4ed8"
//! similarity_fg = "#7c3aed"
//! info_fg = "#0369a1"
//! success_fg = "#15803d"
//! error_fg = "#b91c1c"
//! ```
//!
//! # Example
//!
//! ```rust
//! use photofindr::ui::theme::Theme;
//!
//! let dark = Theme::from_name("dark").unwrap();
//! let line = format!("{}PhotoFindr{}", Theme::fg(&dark.colors.accent), Theme::reset());
//! assert!(line.starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::error::{PhotoFindrError, Result};
use crate::domain::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const ESC: &str = "\u{1b}[";

/// A named palette for the text renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Palette entries, each a `#rrggbb` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Navbar title and page tabs.
    pub header_fg: String,
    /// Navbar fill; the light palette leaves it unset.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active page marker, prompts, and the submit control.
    pub accent: String,

    pub text_normal: String,
    /// Footer hints, status lines, and subtitles.
    pub text_dim: String,

    /// Separator line color.
    pub border: String,

    /// Drive and preview links.
    pub link_fg: String,
    /// Similarity percentage.
    pub similarity_fg: String,

    pub info_fg: String,
    pub success_fg: String,
    pub error_fg: String,
}

/// Which half of the cell an SGR color applies to.
#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

impl Layer {
    const fn sgr_code(self) -> u8 {
        match self {
            Self::Foreground => 38,
            Self::Background => 48,
        }
    }
}

impl Theme {
    /// Returns the built-in `light` or `dark` palette.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(source).ok()
    }

    /// Reads a custom palette from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoFindrError::Theme`] if the file cannot be read or its
    /// content is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| PhotoFindrError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&raw)
            .map_err(|e| PhotoFindrError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Foreground color for a notification of the given severity.
    #[must_use]
    pub fn severity_color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Info => &self.colors.info_fg,
            Severity::Success => &self.colors.success_fg,
            Severity::Error => &self.colors.error_fg,
        }
    }

    /// Splits `#rrggbb` into channels. Anything else renders as white.
    fn channels(hex: &str) -> [u8; 3] {
        let digits = hex.trim().trim_start_matches('#');
        let packed = (digits.len() == 6)
            .then(|| u32::from_str_radix(digits, 16).ok())
            .flatten()
            .unwrap_or(0x00FF_FFFF);

        let [_, r, g, b] = packed.to_be_bytes();
        [r, g, b]
    }

    fn truecolor(layer: Layer, hex: &str) -> String {
        let [r, g, b] = Self::channels(hex);
        format!("{ESC}{};2;{r};{g};{b}m", layer.sgr_code())
    }

    /// 24-bit foreground escape for a hex color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use photofindr::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#2563eb"), "\u{1b}[38;2;37;99;235m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::truecolor(Layer::Foreground, hex)
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::truecolor(Layer::Background, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{1b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{1b}[2m"
    }

    /// Clears every active attribute.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{1b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in light theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the unit tests rule out.
    fn default() -> Self {
        Self::from_name("light").expect("built-in light theme should always parse")
    }
}

/// Light or dark preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parses `light` or `dark`, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Process-wide theme preference, independent of the photo workflows.
///
/// Holds one palette per mode. A custom theme replaces the palette of the mode
/// it is installed for; toggling still switches to the other built-in palette.
///
/// # Example
///
/// ```rust
/// use photofindr::ui::theme::{ThemeMode, ThemeStore};
///
/// let mut store = ThemeStore::new(ThemeMode::Light);
/// assert_eq!(store.toggle(), ThemeMode::Dark);
/// assert_eq!(store.current().name, "dark");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStore {
    mode: ThemeMode,
    light: Theme,
    dark: Theme,
}

impl ThemeStore {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            light: Theme::default(),
            dark: Theme::from_name("dark").unwrap_or_default(),
        }
    }

    /// Replaces the palette used for `mode`.
    #[must_use]
    pub fn with_custom(mut self, mode: ThemeMode, theme: Theme) -> Self {
        tracing::debug!(theme = %theme.name, mode = %mode, "custom theme installed");
        match mode {
            ThemeMode::Light => self.light = theme,
            ThemeMode::Dark => self.dark = theme,
        }
        self
    }

    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub const fn current(&self) -> &Theme {
        match self.mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Switches between light and dark and returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
