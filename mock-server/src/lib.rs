//! In-memory stand-in for the Glyph API.
//!
//! Serves the three client routes against a fixed template catalog and
//! answers every failure with the service's `{"error", "code"}` envelope.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, Query, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

/// API key accepted when none is configured.
pub const DEFAULT_API_KEY: &str = "gk_test";

/// Template id whose schema route fails with a non-JSON 500.
pub const BROKEN_TEMPLATE_ID: &str = "broken";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip)]
    pub schema: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub url: String,
    pub session_id: String,
    pub format: String,
    pub size: u64,
    pub filename: String,
    pub expires_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInput {
    pub data: Option<Map<String, Value>>,
    pub html: Option<String>,
    pub url: Option<String>,
    pub template_id: Option<String>,
    pub intent: Option<String>,
    #[serde(default = "default_format")]
    pub format: String,
    pub ttl: Option<u64>,
}

fn default_format() -> String {
    "pdf".to_string()
}

#[derive(Deserialize)]
pub struct TemplateFilter {
    pub category: Option<String>,
}

#[derive(Debug)]
pub struct AppState {
    api_key: String,
    catalog: Vec<Template>,
}

pub type SharedState = Arc<AppState>;

/// Error envelope returned by every failing route.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
    code: &'static str,
}

impl ApiError {
    fn new(status: StatusCode, message: &'static str, code: &'static str) -> Self {
        Self { status, message, code }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"error": self.message, "code": self.code}))).into_response()
    }
}

/// Rejects requests without `Authorization: Bearer <api key>`.
pub struct Authorized;

impl FromRequestParts<SharedState> for Authorized {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        match presented {
            Some(key) if key == state.api_key => Ok(Authorized),
            _ => Err(ApiError::new(StatusCode::UNAUTHORIZED, "Invalid API key", "UNAUTHORIZED")),
        }
    }
}

pub fn catalog() -> Vec<Template> {
    vec![
        Template {
            id: "invoice-clean".to_string(),
            name: "Clean Invoice".to_string(),
            category: "invoices".to_string(),
            schema: json!({
                "type": "object",
                "required": ["company", "total"],
                "properties": {
                    "company": {"type": "string"},
                    "total": {"type": "string"},
                    "lineItems": {"type": "array"}
                }
            }),
        },
        Template {
            id: "receipt".to_string(),
            name: "Receipt".to_string(),
            category: "receipts".to_string(),
            schema: json!({
                "type": "object",
                "required": ["merchant"],
                "properties": {"merchant": {"type": "string"}}
            }),
        },
        Template {
            id: "inv oice/1".to_string(),
            name: "Legacy Invoice".to_string(),
            category: "invoices".to_string(),
            schema: json!({"type": "object", "properties": {}}),
        },
        Template {
            id: BROKEN_TEMPLATE_ID.to_string(),
            name: "Broken".to_string(),
            category: "internal".to_string(),
            schema: Value::Null,
        },
    ]
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = Arc::new(AppState {
        api_key: api_key.to_string(),
        catalog: catalog(),
    });
    Router::new()
        .route("/v1/create", post(create))
        .route("/v1/templates", get(list_templates))
        .route("/v1/templates/{id}/schema", get(template_schema))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

async fn create(
    _auth: Authorized,
    State(state): State<SharedState>,
    payload: Result<Json<CreateInput>, JsonRejection>,
) -> Result<Json<CreateResponse>, ApiError> {
    let Json(input) = payload.map_err(|_| {
        ApiError::new(StatusCode::BAD_REQUEST, "Request body must be a JSON object", "INVALID_JSON")
    })?;
    if input.data.is_none() && input.html.is_none() && input.url.is_none() && input.template_id.is_none() {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Provide data, html, url or templateId",
            "MISSING_INPUT",
        ));
    }
    if input.format != "pdf" && input.format != "png" {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "format must be pdf or png",
            "INVALID_FORMAT",
        ));
    }
    if let Some(id) = &input.template_id {
        if !state.catalog.iter().any(|t| &t.id == id) {
            return Err(template_not_found());
        }
    }

    let session_id = Uuid::new_v4().to_string();
    let filename = format!("{session_id}.{}", input.format);
    info!(%session_id, format = %input.format, "generated artifact");
    Ok(Json(CreateResponse {
        url: format!("https://cdn.glyph.you/{filename}"),
        session_id,
        size: input.html.as_ref().map_or(1024, |html| html.len() as u64 + 1024),
        expires_at: format!("+{}s", input.ttl.unwrap_or(3600)),
        format: input.format,
        filename,
        analysis: input.intent.map(|intent| json!({"intent": intent, "documentType": "document"})),
    }))
}

async fn list_templates(
    _auth: Authorized,
    State(state): State<SharedState>,
    Query(filter): Query<TemplateFilter>,
) -> Json<Value> {
    let templates: Vec<&Template> = state
        .catalog
        .iter()
        .filter(|t| filter.category.as_deref().is_none_or(|c| t.category == c))
        .collect();
    Json(json!({"templates": templates}))
}

async fn template_schema(
    _auth: Authorized,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    if id == BROKEN_TEMPLATE_ID {
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response());
    }
    state
        .catalog
        .iter()
        .find(|t| t.id == id)
        .map(|t| Json(t.schema.clone()).into_response())
        .ok_or_else(template_not_found)
}

fn template_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Template not found", "TEMPLATE_NOT_FOUND")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_serializes_without_schema() {
        let json = serde_json::to_value(&catalog()[0]).unwrap();
        assert_eq!(json, json!({"id": "invoice-clean", "name": "Clean Invoice", "category": "invoices"}));
    }

    #[test]
    fn create_response_uses_camel_case() {
        let response = CreateResponse {
            url: "u".to_string(),
            session_id: "s".to_string(),
            format: "pdf".to_string(),
            size: 1,
            filename: "f".to_string(),
            expires_at: "e".to_string(),
            analysis: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionId"], "s");
        assert_eq!(json["expiresAt"], "e");
        assert!(json.get("analysis").is_none());
    }

    #[test]
    fn create_input_defaults_format_to_pdf() {
        let input: CreateInput = serde_json::from_str(r#"{"html":"<p/>"}"#).unwrap();
        assert_eq!(input.format, "pdf");
        assert!(input.template_id.is_none());
    }

    #[test]
    fn create_input_reads_template_id_in_camel_case() {
        let input: CreateInput = serde_json::from_str(r#"{"templateId":"receipt"}"#).unwrap();
        assert_eq!(input.template_id.as_deref(), Some("receipt"));
    }

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = catalog();
        for (i, t) in catalog.iter().enumerate() {
            assert!(catalog[i + 1..].iter().all(|other| other.id != t.id), "{}", t.id);
        }
    }
}
