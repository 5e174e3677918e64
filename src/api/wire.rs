//! JSON request and response bodies of the backend contract.
//!
//! Response list fields are `Option<Vec<_>>` with `#[serde(default)]` so that a
//! missing field and an explicit `null` both decode to "nothing".

use crate::domain::{CaptionedImage, ImageRef, Photo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchDriveRequest<'a> {
    pub drive_link: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct FetchDriveResponse {
    #[serde(default)]
    pub images: Option<Vec<ImageRef>>,
}

#[derive(Debug, Serialize)]
pub struct CaptionRequest<'a> {
    pub images: &'a [ImageRef],
}

#[derive(Debug, Default, Deserialize)]
pub struct CaptionResponse {
    #[serde(default)]
    pub captions: Option<Vec<CaptionedImage>>,
}

#[derive(Debug, Serialize)]
pub struct StoreRequest<'a> {
    pub photos: &'a [CaptionedImage],
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<Photo>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_bodies_use_backend_field_names() {
        let body = serde_json::to_value(FetchDriveRequest { drive_link: "https://d/x" }).unwrap();
        assert_eq!(body, serde_json::json!({ "driveLink": "https://d/x" }));

        let store = serde_json::to_value(StoreRequest { photos: &[] }).unwrap();
        assert_eq!(store, serde_json::json!({ "photos": [] }));
    }

    #[test]
    fn null_and_missing_lists_decode_to_none() {
        let null: SearchResponse = serde_json::from_str(r#"{"results":null}"#).unwrap();
        assert!(null.results.is_none());

        let missing: FetchDriveResponse = serde_json::from_str(r#"{"count":0}"#).unwrap();
        assert!(missing.images.is_none());

        let not_ready: CaptionResponse =
            serde_json::from_str(r#"{"status":"model_not_ready","captions":[],"count":0}"#).unwrap();
        assert_eq!(not_ready.captions.map(|c| c.len()), Some(0));
    }
}
