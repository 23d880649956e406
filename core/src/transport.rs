//! Blocking HTTP execution with `ureq`.
//!
//! Turns an `HttpRequest` into a network round-trip and hands back the
//! `HttpResponse` as data. Status codes are never treated as transport
//! errors here; interpreting them is the client's job.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes plain-data requests over the network.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = req.path.as_str();
        let body = req.body.as_deref();

        let result = match (req.method, body) {
            (HttpMethod::Get, _) => self.agent.get(path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(path).call(),
            (HttpMethod::Post, Some(body)) => {
                self.agent.post(path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.agent.post(path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                self.agent.put(path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => self.agent.put(path).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                self.agent.patch(path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => self.agent.patch(path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
