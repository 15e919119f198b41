//! Error types for the Glyph API client.
//!
//! # Design
//! Failures that the service contract anticipates are normalized into one
//! `ServiceError` shape: transport failures (status 0, `CONNECTION_ERROR`)
//! and non-2xx responses (the HTTP status plus whatever `error` / `code` the
//! server put in the body). A successful response whose body is not valid
//! JSON is not one of those: it surfaces as `ClientError::Decode` and is
//! never folded into a `ServiceError`.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// `code` of a `ServiceError` raised when the HTTP exchange never completed.
pub const CONNECTION_ERROR: &str = "CONNECTION_ERROR";

/// `code` of a `ServiceError` whose error body carried no usable `code`.
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

pub type Result<T> = std::result::Result<T, ClientError>;

/// Normalized error reported by the Glyph service or the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status}, code {code})")]
pub struct ServiceError {
    pub message: String,
    /// HTTP status, or 0 when no response was received.
    pub status: u16,
    pub code: String,
}

impl ServiceError {
    /// Transport-level failure: DNS, refused connection, TLS, reset.
    pub fn connection(reason: impl fmt::Display) -> Self {
        Self {
            message: format!("Connection error: {reason}"),
            status: 0,
            code: CONNECTION_ERROR.to_string(),
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// The body is parsed best-effort. Anything that is not a JSON object, and
    /// any `error` / `code` member that is not a string, falls back to the
    /// generated defaults.
    pub fn from_response(status: u16, body: impl AsRef<[u8]>) -> Self {
        let parsed: Value = serde_json::from_slice(body.as_ref()).unwrap_or(Value::Null);
        let field = |name: &str| parsed.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            message: field("error").unwrap_or_else(|| format!("Request failed with status {status}")),
            status,
            code: field("code").unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        }
    }

    pub fn is_connection_error(&self) -> bool {
        self.status == 0
    }
}

/// Errors returned by every `GlyphClient` operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service rejected the request or could not be reached.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A 2xx response body was not the JSON the operation expects.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            ClientError::Service(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_uses_server_fields() {
        let err = ServiceError::from_response(422, r#"{"error":"bad field","code":"INVALID_FIELD"}"#);
        assert_eq!(err.status, 422);
        assert_eq!(err.code, "INVALID_FIELD");
        assert_eq!(err.message, "bad field");
    }

    #[test]
    fn response_error_falls_back_on_garbage() {
        let err = ServiceError::from_response(500, "<html>upstream down</html>");
        assert_eq!(err.status, 500);
        assert_eq!(err.code, UNKNOWN_ERROR);
        assert_eq!(err.message, "Request failed with status 500");
    }

    #[test]
    fn response_error_fills_missing_fields_independently() {
        let err = ServiceError::from_response(403, r#"{"error":"forbidden"}"#);
        assert_eq!(err.message, "forbidden");
        assert_eq!(err.code, UNKNOWN_ERROR);

        let err = ServiceError::from_response(429, r#"{"code":"RATE_LIMITED"}"#);
        assert_eq!(err.message, "Request failed with status 429");
        assert_eq!(err.code, "RATE_LIMITED");
    }

    #[test]
    fn response_error_ignores_non_object_and_non_string_fields() {
        let err = ServiceError::from_response(400, r#"["error","code"]"#);
        assert_eq!(err.code, UNKNOWN_ERROR);

        let err = ServiceError::from_response(400, r#"{"error":{"detail":"x"},"code":17}"#);
        assert_eq!(err.message, "Request failed with status 400");
        assert_eq!(err.code, UNKNOWN_ERROR);
    }

    #[test]
    fn response_error_with_empty_body() {
        let err = ServiceError::from_response(502, "");
        assert_eq!(err.message, "Request failed with status 502");
        assert!(!err.is_connection_error());
    }

    #[test]
    fn response_error_with_invalid_utf8_body() {
        let err = ServiceError::from_response(503, b"\xff\xfe\xfd".as_slice());
        assert_eq!(err.message, "Request failed with status 503");
        assert_eq!(err.code, UNKNOWN_ERROR);
    }

    #[test]
    fn connection_error_shape() {
        let err = ServiceError::connection("Connection refused");
        assert_eq!(err.status, 0);
        assert_eq!(err.code, CONNECTION_ERROR);
        assert_eq!(err.message, "Connection error: Connection refused");
        assert!(err.is_connection_error());
    }

    #[test]
    fn client_error_exposes_service_error() {
        let err = ClientError::from(ServiceError::from_response(404, "{}"));
        assert_eq!(err.as_service().map(|e| e.status), Some(404));

        let decode = serde_json::from_str::<Value>("not json").unwrap_err();
        assert!(ClientError::Decode(decode).as_service().is_none());
    }

    #[test]
    fn display_includes_status_and_code() {
        let err = ServiceError::from_response(401, r#"{"error":"Invalid API key","code":"UNAUTHORIZED"}"#);
        assert_eq!(err.to_string(), "Invalid API key (status 401, code UNAUTHORIZED)");
    }
}
