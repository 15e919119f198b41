//! Blocking execution of `HttpRequest` values over ureq.
//!
//! Status codes are returned as data (`http_status_as_error(false)`) so the
//! client, not the transport, decides what a 4xx/5xx means. Only failures to
//! complete the exchange become errors here.

use tracing::debug;

use crate::error::ServiceError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub(crate) fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

pub(crate) fn execute(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, ServiceError> {
    debug!(method = %request.method, url = %request.url, "dispatching request");

    let result = match request.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match &request.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(ServiceError::connection)?;
    let status = response.status().as_u16();
    debug!(status, url = %request.url, "received response");

    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
        .collect();

    // No size cap of our own: the whole body is read, as the service sends it.
    let body = match response.body_mut().with_config().limit(u64::MAX).read_to_vec() {
        Ok(body) => body,
        // An unreadable error body is handled like an unparseable one.
        Err(_) if !(200..300).contains(&status) => Vec::new(),
        Err(err) => return Err(ServiceError::connection(err)),
    };

    Ok(HttpResponse { status, headers, body })
}
