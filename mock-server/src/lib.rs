//! Fixture HTTP server for exercising the fetch helpers over real sockets.
//!
//! `run` serves the fixtures over plain HTTP. `run_tls` serves the same
//! routes over HTTPS with a freshly generated self-signed certificate that no
//! client trusts.

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Bytes that can never decode as UTF-8.
pub const NOT_UTF8: [u8; 4] = [0xff, 0xfe, 0xc3, 0x28];

/// Size of the `/large` body, just over 10 MiB.
pub const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

pub fn app() -> Router {
    Router::new()
        .route("/text", get(text))
        .route("/missing", get(missing))
        .route("/json", get(json_object))
        .route("/json/error", get(json_error))
        .route("/json/array", get(json_array))
        .route("/not-json", get(not_json))
        .route("/binary", get(binary))
        .route("/cookies", get(cookies))
        .route("/large", get(large))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `app()` over HTTPS on an already bound, non-blocking listener.
pub async fn run_tls(listener: std::net::TcpListener) -> Result<(), std::io::Error> {
    let config = RustlsConfig::from_config(Arc::new(self_signed_config()?));
    axum_server::from_tcp_rustls(listener, config)
        .serve(app().into_make_service())
        .await
}

/// Server config for a self-signed `localhost` / `127.0.0.1` certificate.
fn self_signed_config() -> Result<rustls::ServerConfig, std::io::Error> {
    let names = vec!["localhost".to_string(), "127.0.0.1".to_string()];
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(names).map_err(std::io::Error::other)?;
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(std::io::Error::other)?
        .with_no_client_auth()
        .with_single_cert(vec![cert.der().clone()], key)
        .map_err(std::io::Error::other)?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Ok(config)
}

async fn text() -> &'static str {
    "hello"
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

async fn json_object() -> Json<Value> {
    Json(json!({ "a": 1 }))
}

async fn json_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "boom" })),
    )
}

async fn json_array() -> Json<Value> {
    Json(json!([1, 2, 3]))
}

async fn not_json() -> &'static str {
    "not json"
}

async fn binary() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_UTF8.to_vec(),
    )
}

async fn large() -> Vec<u8> {
    vec![b'a'; LARGE_BODY_LEN]
}

/// Echo the `Cookie` header back as the body.
async fn cookies(headers: HeaderMap) -> String {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_utf8_fixture_is_invalid() {
        assert!(std::str::from_utf8(&NOT_UTF8).is_err());
    }

    #[test]
    fn self_signed_config_builds() {
        let config = self_signed_config().unwrap();
        assert_eq!(config.alpn_protocols, vec![b"http/1.1".to_vec()]);
    }

    #[tokio::test]
    async fn large_body_has_fixed_length() {
        let body = large().await;
        assert_eq!(body.len(), LARGE_BODY_LEN);
        assert!(body.iter().all(|&b| b == b'a'));
    }

    #[tokio::test]
    async fn cookies_echo_is_empty_without_header() {
        assert_eq!(cookies(HeaderMap::new()).await, "");
    }

    #[tokio::test]
    async fn cookies_echo_returns_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "a=1; b=2".parse().unwrap());
        assert_eq!(cookies(headers).await, "a=1; b=2");
    }
}
