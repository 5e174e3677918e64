//! Backend boundary.
//!
//! Every network call the client makes goes through the [`Backend`] trait. The
//! production implementation is [`HttpBackend`], which speaks the JSON-over-HTTP
//! contract of the PhotoFindr service. [`MockBackend`] is a scriptable in-memory
//! stand-in that records every call for ordering and count assertions.
//!
//! # Endpoints
//!
//! | Call              | Method & path           | Request body              |
//! |-------------------|-------------------------|---------------------------|
//! | Fetch images      | `POST /api/fetch-drive` | `{ "driveLink": "..." }`  |
//! | Generate captions | `POST /api/caption`     | `{ "images": [...] }`     |
//! | Store photos      | `POST /api/store`       | `{ "photos": [...] }`     |
//! | Search            | `GET /api/search?query` | none                      |
//! | Health            | `GET /health`           | none                      |

pub mod backend;
pub mod http;
pub mod mock;
pub mod wire;

pub use backend::{Backend, BackendHealth};
pub use http::HttpBackend;
pub use mock::{BackendCall, MockBackend, MockFailure};
