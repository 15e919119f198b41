//! Synchronous client for the Glyph PDF API.
//!
//! # Design
//! `GlyphClient` holds an immutable `ClientConfig` and a ureq agent, and
//! carries no other state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the plain `create` / `templates` /
//! `template_schema` methods run both halves around one blocking round trip.
//! Hosts with their own HTTP stack can drive the two halves themselves.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, ServiceError};
use crate::http::{encode_path_segment, encode_query_value, HttpMethod, HttpRequest, HttpResponse};
use crate::transport;
use crate::types::{CreateRequest, CreateResult, Template, TemplateList, TemplateSchema};

/// Client for the Glyph API.
///
/// No retries, no timeout of its own, one request in flight per call. Cloning
/// is cheap and clones share the underlying agent.
#[derive(Clone)]
pub struct GlyphClient {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl GlyphClient {
    /// Client for the hosted API. Performs no network activity.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self::from_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            agent: transport::agent(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate a PDF or PNG from data, HTML, a URL or a template.
    pub fn create(&self, request: &CreateRequest) -> Result<CreateResult> {
        let req = self.build_create(request)?;
        self.parse_create(self.execute(&req)?)
    }

    /// List available templates, optionally filtered by category.
    pub fn templates(&self, category: Option<&str>) -> Result<Vec<Template>> {
        let req = self.build_templates(category);
        self.parse_templates(self.execute(&req)?)
    }

    /// Fetch the JSON schema for a template.
    pub fn template_schema(&self, template_id: &str) -> Result<TemplateSchema> {
        let req = self.build_template_schema(template_id);
        self.parse_template_schema(self.execute(&req)?)
    }

    pub fn build_create(&self, request: &CreateRequest) -> Result<HttpRequest> {
        let body = serde_json::to_string(request).map_err(ClientError::Encode)?;
        Ok(self.request(HttpMethod::Post, "/v1/create", Some(body)))
    }

    pub fn build_templates(&self, category: Option<&str>) -> HttpRequest {
        let path = match category {
            Some(category) => format!("/v1/templates?category={}", encode_query_value(category)),
            None => "/v1/templates".to_string(),
        };
        self.request(HttpMethod::Get, &path, None)
    }

    pub fn build_template_schema(&self, template_id: &str) -> HttpRequest {
        let path = format!("/v1/templates/{}/schema", encode_path_segment(template_id));
        self.request(HttpMethod::Get, &path, None)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<CreateResult> {
        parse_json(&response)
    }

    pub fn parse_templates(&self, response: HttpResponse) -> Result<Vec<Template>> {
        let list: TemplateList = parse_json(&response)?;
        Ok(list.templates.unwrap_or_default())
    }

    pub fn parse_template_schema(&self, response: HttpResponse) -> Result<TemplateSchema> {
        parse_json(&response)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.config.base_url()),
            headers: vec![
                ("authorization".to_string(), format!("Bearer {}", self.config.api_key())),
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        Ok(transport::execute(&self.agent, request)?)
    }
}

impl fmt::Debug for GlyphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphClient").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Map a non-2xx response to a `ServiceError`, otherwise decode the body.
fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    check_status(response)?;
    serde_json::from_slice(&response.body).map_err(ClientError::Decode)
}

fn check_status(response: &HttpResponse) -> std::result::Result<(), ServiceError> {
    if response.is_success() {
        return Ok(());
    }
    let err = ServiceError::from_response(response.status, &response.body);
    warn!(status = err.status, code = %err.code, "glyph request failed: {}", err.message);
    Err(err)
}
