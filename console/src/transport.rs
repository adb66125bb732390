//! Blocking `Transport` backed by ureq.

use inventory_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use ureq::RequestBuilder;

/// Executes core requests over HTTP.
///
/// ureq's status-as-error behavior is disabled so 4xx/5xx responses come
/// back as data and the core interprets them. Only failures to complete the
/// exchange become `NetworkUnreachable`; a body that arrives but is not UTF-8
/// is `MalformedResponse`.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "sending request");

        let headers = req.headers.as_slice();
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.path), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&req.path), headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.path), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&req.path), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.path), headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&req.path), headers).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;
        let body = String::from_utf8(bytes).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        tracing::debug!(status, "received response");
        Ok(HttpResponse::new(status, body))
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
