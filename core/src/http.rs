//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe one exchange as plain data. The
//! client builds requests and parses responses without touching the network;
//! `transport` is the only place that performs I/O. Hosts that bring their own
//! HTTP stack can call the `build_*` / `parse_*` pairs directly.
//!
//! The percent-encoders live here because they only exist to produce request
//! URLs. Both keep the RFC 3986 unreserved set (`A-Z a-z 0-9 - . _ ~`) and
//! escape every other byte of the UTF-8 input.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the configured base URL followed by the operation path
/// and, for listings, the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `body` is kept as raw bytes; decoding is the client's job so that a body
/// that is not UTF-8 is reported as a decode failure, not a transport one.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Encode a value for use as a single path segment. Nothing is left
/// unescaped outside the unreserved set, `/` included.
pub fn encode_path_segment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            push_escaped(&mut out, byte);
        }
    }
    out
}

/// Encode a value for a `application/x-www-form-urlencoded` query string.
/// Spaces become `+`.
pub fn encode_query_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        match byte {
            b' ' => out.push('+'),
            b if is_unreserved(b) => out.push(b as char),
            b => push_escaped(&mut out, b),
        }
    }
    out
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn push_escaped(out: &mut String, byte: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    out.push('%');
    out.push(HEX[(byte >> 4) as usize] as char);
    out.push(HEX[(byte & 0x0f) as usize] as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_escapes_slash_and_space() {
        assert_eq!(encode_path_segment("inv oice/1"), "inv%20oice%2F1");
    }

    #[test]
    fn path_segment_keeps_unreserved() {
        assert_eq!(encode_path_segment("invoice-clean_v2.1~a"), "invoice-clean_v2.1~a");
    }

    #[test]
    fn path_segment_escapes_reserved_and_utf8() {
        assert_eq!(encode_path_segment("a?b#c&d=e"), "a%3Fb%23c%26d%3De");
        assert_eq!(encode_path_segment("café"), "caf%C3%A9");
    }

    #[test]
    fn query_value_uses_plus_for_space() {
        assert_eq!(encode_query_value("sales reports"), "sales+reports");
    }

    #[test]
    fn query_value_escapes_reserved() {
        assert_eq!(encode_query_value("a&b=c+d/e"), "a%26b%3Dc%2Bd%2Fe");
    }

    #[test]
    fn request_header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/v1/templates".to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn response_success_range() {
        let mut response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 299;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 422;
        assert!(!response.is_success());
    }
}
