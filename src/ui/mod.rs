//! Text user interface: themes, view models, and rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Component renderers (navbar, pages, notification, footer)
//! - [`theme`]: Light/dark palettes, the theme store, and ANSI escape sequences

pub mod components;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel, CLEAR_SCREEN};
pub use theme::{Theme, ThemeMode, ThemeStore};
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, HomeView, PageView, SearchView, ToastInfo,
    UIViewModel,
};
