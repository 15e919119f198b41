//! Synchronous client for the Glyph PDF generation API.
//!
//! # Overview
//! Asks the Glyph service to render a PDF or PNG from structured data, raw
//! HTML, a URL or a stored template, and lists templates and their schemas.
//! Rendering happens server-side; this crate maps typed calls onto single
//! blocking HTTP/JSON exchanges and normalizes failures.
//!
//! ```no_run
//! use glyph_pdf::{CreateRequest, GlyphClient};
//! use serde_json::{json, Map};
//!
//! # fn main() -> glyph_pdf::Result<()> {
//! let glyph = GlyphClient::new("gk_your_api_key");
//!
//! let mut data = Map::new();
//! data.insert("company".into(), json!("Acme Corp"));
//! data.insert("total".into(), json!("$1,250.00"));
//!
//! let result = glyph.create(&CreateRequest::new().data(data))?;
//! println!("{:?}", result.url());
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `GlyphClient` holds only an immutable `ClientConfig` and a ureq agent.
//! - Every operation is a `build_*` / `parse_*` pair around the I/O boundary,
//!   so request construction and error normalization are testable as data.
//! - Errors: `ServiceError` for transport failures (status 0) and non-2xx
//!   responses; a malformed 2xx body is a separate `ClientError::Decode`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod transport;
pub mod types;

pub use client::GlyphClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_FORMAT, VERSION};
pub use error::{ClientError, Result, ServiceError, CONNECTION_ERROR, UNKNOWN_ERROR};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateRequest, CreateResult, Template, TemplateSchema};
