//! Construction-time configuration for `GlyphClient`.

use std::fmt;

use serde::Deserialize;

/// Address of the hosted Glyph API.
pub const DEFAULT_BASE_URL: &str = "https://api.glyph.you";

/// Output format sent with `create` when the caller does not pick one.
pub const DEFAULT_FORMAT: &str = "pdf";

/// Version of this client library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// API key and base address. Immutable once built.
///
/// Deserializable so hosts can embed it in their own configuration files;
/// `base_url` may be omitted there.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawConfig")]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct RawConfig {
    api_key: String,
    #[serde(default = "default_base_url")]
    base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl From<RawConfig> for ClientConfig {
    fn from(raw: RawConfig) -> Self {
        ClientConfig::new(raw.api_key).with_base_url(&raw.base_url)
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Replace the base address. Trailing slashes are stripped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
