//! Domain layer for the PhotoFindr client.
//!
//! Contains the value types that flow between the controller, the workflow
//! components, and the backend boundary. Nothing here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`photo`]: Folder links, image references, captions, and photos
//! - [`outcome`]: Ingest outcomes and notifications
//!
//! # Examples
//!
//! ```
//! use photofindr::domain::{FolderLink, Result};
//!
//! fn parse() -> Result<FolderLink> {
//!     FolderLink::parse("  https://drive.google.com/drive/folders/ABC  ")
//! }
//! assert_eq!(parse().unwrap().as_str(), "https://drive.google.com/drive/folders/ABC");
//! ```

pub mod error;
pub mod outcome;
pub mod photo;

pub use error::{PhotoFindrError, Result};
pub use outcome::{FailureKind, IngestFailure, IngestOutcome, IngestStep, Notification, Severity};
pub use photo::{CaptionedImage, FolderLink, ImageRef, Photo, PhotoId, SearchQuery};
