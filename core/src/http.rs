//! HTTP transport types and the blocking `ureq` transport.
//!
//! # Design
//! Requests and responses are plain data. `fetch` builds an `HttpRequest`,
//! hands it to a `Transport`, and parses the returned `HttpResponse`. Only the
//! transport touches the network, so the build and parse halves stay
//! deterministic and can be tested with canned responses.
//!
//! Non-2xx statuses are data, not errors: the transport returns every response
//! it receives and leaves interpretation to the caller.

use ureq::tls::TlsConfig;

use crate::error::TransportError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub uri: String,
    pub headers: Vec<(String, String)>,
    /// Enforce TLS certificate and hostname checks for `https` URIs.
    pub verify_tls: bool,
}

/// An HTTP response described as plain data.
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

/// Executes one `HttpRequest` and returns whatever the server answered.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by `ureq`.
///
/// A fresh agent is configured per request so the verification flag of one
/// call never leaks into another. Response bodies are read without a size
/// limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    fn agent(verify_tls: bool) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!verify_tls)
                    .build(),
            )
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = Self::agent(request.verify_tls);

        let mut builder = agent.get(request.uri.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.call().map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| TransportError::Connection(Box::new(e)))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Requests that were rejected before any I/O are `Malformed`; the rest are
/// connection failures.
fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::BadUri(reason) => TransportError::Malformed(reason),
        ureq::Error::Http(e) => TransportError::Malformed(e.to_string()),
        other => TransportError::Connection(Box::new(other)),
    }
}
