//! Photo-related value types exchanged with the backend.
//!
//! The backend owns every [`Photo`]; the client only ever holds transient,
//! read-only copies received from fetch or search responses. Image references
//! returned by the folder listing are treated as opaque: fields the client does
//! not know about are kept and forwarded verbatim to the caption step.

use super::error::{PhotoFindrError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Minimum length of a Drive file id when scanning a link for one.
const DRIVE_FILE_ID_MIN_LEN: usize = 25;

/// A user-supplied link to a shared folder.
///
/// Always non-empty and trimmed. Construct with [`FolderLink::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderLink(String);

impl FolderLink {
    /// Trims the raw input and rejects it when nothing remains.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoFindrError::Validation`] for empty or whitespace-only input.
    ///
    /// # Examples
    ///
    /// ```
    /// use photofindr::domain::FolderLink;
    ///
    /// assert!(FolderLink::parse("   ").is_err());
    /// let link = FolderLink::parse(" https://drive.google.com/drive/folders/ABC\n").unwrap();
    /// assert_eq!(link.as_str(), "https://drive.google.com/drive/folders/ABC");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhotoFindrError::Validation("folder link must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A natural-language search query, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims the raw input and rejects it when nothing remains.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoFindrError::Validation`] for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhotoFindrError::Validation("search query must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One image discovered by the folder listing.
///
/// Known fields are typed for logging and display; everything else the backend
/// sends is kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image reference paired with its generated caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    pub caption: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identifier of a stored photo. The backend may use integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhotoId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A durable, searchable photo record as returned by the backend.
///
/// `similarity` is present only in search results and lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub drive_link: String,
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl Photo {
    /// Returns a URL that serves the image bytes directly.
    ///
    /// Drive share links are rewritten to the `uc?export=view` form using the first
    /// run of at least 25 id characters found in the link. Links without such a run
    /// are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use photofindr::domain::{Photo, PhotoId};
    ///
    /// let photo = Photo {
    ///     id: PhotoId::Number(1),
    ///     drive_link: "https://drive.google.com/file/d/1AbCdEfGhIjKlMnOpQrStUvWxYz_-12/view".into(),
    ///     caption: "a beach at sunset".into(),
    ///     similarity: None,
    /// };
    /// assert_eq!(
    ///     photo.preview_url(),
    ///     "https://drive.google.com/uc?export=view&id=1AbCdEfGhIjKlMnOpQrStUvWxYz_-12"
    /// );
    /// ```
    #[must_use]
    pub fn preview_url(&self) -> String {
        drive_file_id(&self.drive_link).map_or_else(
            || self.drive_link.clone(),
            |id| format!("https://drive.google.com/uc?export=view&id={id}"),
        )
    }

    /// Similarity as a whole percentage, clamped to `0..=100`.
    #[must_use]
    pub fn similarity_percent(&self) -> Option<u8> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        self.similarity
            .filter(|s| s.is_finite())
            .map(|s| (s * 100.0).round().clamp(0.0, 100.0) as u8)
    }
}

fn drive_file_id(link: &str) -> Option<&str> {
    let is_id_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';

    let mut start = None;
    for (idx, c) in link.char_indices() {
        match (is_id_char(c), start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                if idx - s >= DRIVE_FILE_ID_MIN_LEN {
                    return Some(&link[s..idx]);
                }
                start = None;
            }
            _ => {}
        }
    }

    start.filter(|s| link.len() - s >= DRIVE_FILE_ID_MIN_LEN).map(|s| &link[s..])
}
