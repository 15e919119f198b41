//! Request and response payloads for the Glyph API.
//!
//! # Design
//! `CreateRequest` keeps one `Option` per optional field so serialization can
//! omit exactly the fields the caller never set. An explicitly supplied empty
//! string or empty map is still `Some` and is still sent. Response payloads
//! are owned by the service and kept as JSON values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DEFAULT_FORMAT;

/// A template entry from the catalog. The shape is defined by the service.
pub type Template = Value;

/// JSON schema describing the data a template expects.
pub type TemplateSchema = Map<String, Value>;

/// Payload for `POST /v1/create`.
///
/// Supply at least one source (`data`, `html`, `url` or `template_id`); the
/// service, not the client, enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
    /// Lifetime of the hosted artifact, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for CreateRequest {
    fn default() -> Self {
        Self {
            data: None,
            html: None,
            url: None,
            template_id: None,
            intent: None,
            style: None,
            format: default_format(),
            options: None,
            ttl: None,
        }
    }
}

impl CreateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Natural-language description of the document to generate.
    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// `"pdf"` or `"png"`. Not validated locally.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl = Some(seconds);
        self
    }
}

/// Response of `POST /v1/create`, kept verbatim.
///
/// The accessors read the documented members and return `None` when a member
/// is missing or has an unexpected type; nothing is validated on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreateResult(Map<String, Value>);

impl CreateResult {
    /// Address of the generated artifact.
    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn session_id(&self) -> Option<&str> {
        self.str_field("sessionId")
    }

    pub fn format(&self) -> Option<&str> {
        self.str_field("format")
    }

    /// Artifact size in bytes.
    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    pub fn filename(&self) -> Option<&str> {
        self.str_field("filename")
    }

    pub fn expires_at(&self) -> Option<&str> {
        self.str_field("expiresAt")
    }

    pub fn analysis(&self) -> Option<&Value> {
        self.0.get("analysis")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

/// Body of `GET /v1/templates`. A missing or null `templates` member is an
/// empty catalog.
#[derive(Debug, Deserialize)]
pub(crate) struct TemplateList {
    #[serde(default)]
    pub templates: Option<Vec<Template>>,
}
