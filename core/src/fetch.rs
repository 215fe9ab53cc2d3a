//! Plaintext and JSON HTTP GET helpers.
//!
//! # Design
//! Each fetch is split into three steps: `build_get` produces the
//! `HttpRequest`, a `Transport` executes it, and `parse_text` / `parse_json`
//! consume the `HttpResponse`. Non-2xx statuses are logged and otherwise
//! ignored; callers inspect the body to decide what a failure means.
//!
//! The two paths classify transport failures differently. `fetch_text`
//! reports a request that could not be built as `InvalidRequest`, while
//! `fetch_json` folds every transport failure into `Connection`.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{FetchError, TransportError};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::options::FetchOptions;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Runs fetches through a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct Fetcher<T = UreqTransport> {
    transport: T,
}

impl Fetcher<UreqTransport> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// GET `uri` and return the body as UTF-8 text, whatever the status.
    pub fn fetch_text(&self, uri: &str, options: &FetchOptions) -> Result<String, FetchError> {
        info!(uri, "getting plaintext response via HTTP GET");

        let request = build_get(uri, options);
        let response = self.transport.execute(&request).map_err(|e| match e {
            TransportError::Malformed(reason) => FetchError::InvalidRequest {
                uri: uri.to_string(),
                reason,
            },
            source => FetchError::Connection {
                uri: uri.to_string(),
                source,
            },
        })?;

        parse_text(uri, response)
    }

    /// GET `uri` and decode the body as a JSON object, whatever the status.
    pub fn fetch_json(
        &self,
        uri: &str,
        options: &FetchOptions,
    ) -> Result<Map<String, Value>, FetchError> {
        info!(uri, "getting JSON response via HTTP GET");

        let request = build_get(uri, options);
        let response = self
            .transport
            .execute(&request)
            .map_err(|source| FetchError::Connection {
                uri: uri.to_string(),
                source,
            })?;

        parse_json(uri, response)
    }
}

/// Fetch `uri` as text with the default `ureq` transport.
pub fn fetch_text(uri: &str, options: &FetchOptions) -> Result<String, FetchError> {
    Fetcher::new().fetch_text(uri, options)
}

/// Fetch `uri` as a JSON object with the default `ureq` transport.
pub fn fetch_json(uri: &str, options: &FetchOptions) -> Result<Map<String, Value>, FetchError> {
    Fetcher::new().fetch_json(uri, options)
}

pub fn build_get(uri: &str, options: &FetchOptions) -> HttpRequest {
    let headers = options
        .cookie_header()
        .map(|cookie| vec![("Cookie".to_string(), cookie)])
        .unwrap_or_default();
    HttpRequest {
        uri: uri.to_string(),
        headers,
        verify_tls: options.verify,
    }
}

pub fn parse_text(uri: &str, response: HttpResponse) -> Result<String, FetchError> {
    log_status(uri, &response);
    String::from_utf8(response.body).map_err(|source| FetchError::Utf8 {
        uri: uri.to_string(),
        source,
    })
}

/// A leading UTF-8 byte order mark is skipped before decoding.
pub fn parse_json(uri: &str, response: HttpResponse) -> Result<Map<String, Value>, FetchError> {
    log_status(uri, &response);
    let body = response.body.strip_prefix(UTF8_BOM).unwrap_or(&response.body[..]);
    let value: Value = serde_json::from_slice(body).map_err(|source| FetchError::Json {
        uri: uri.to_string(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(FetchError::NotAnObject {
            uri: uri.to_string(),
            found: json_kind(&other),
        }),
    }
}

fn log_status(uri: &str, response: &HttpResponse) {
    if response.is_success() {
        return;
    }
    warn!(
        uri,
        status = response.status,
        "status code ({}) seems to indicate failure",
        response.status
    );
    debug!(
        uri,
        headers = ?response.headers,
        body = %String::from_utf8_lossy(&response.body),
        "failed response"
    );
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
