//! Error types for the console prompt and the HTTP fetch helpers.
//!
//! # Design
//! Fetch errors fall into two families that callers commonly branch on:
//! "could not talk to the server" (`Connection`, plus `InvalidRequest` on the
//! text path) and "talked to the server but the body is unusable" (`Utf8`,
//! `Json`, `NotAnObject`). `FetchError::is_connection` and
//! `FetchError::is_value` expose that split without forcing a full match.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors returned by `prompt_yes_no` and `prompt_yes_no_with`.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The default answer was not one of `y`, `yes`, `n` or `no`.
    #[error("invalid default answer '{0}': expected one of y, yes, n, no")]
    InvalidDefault(String),

    /// The input stream reached end-of-file before a valid answer was read.
    #[error("input closed before a yes/no response was given")]
    InputClosed,

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure reported by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent at all: bad URI, unsupported scheme,
    /// illegal header bytes.
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Anything that went wrong on the wire or while reading the body.
    #[error("connection failed: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by `fetch_text` and `fetch_json`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Only produced by the text path. The JSON path folds this into
    /// `Connection`.
    #[error("invalid request for '{uri}': {reason}")]
    InvalidRequest { uri: String, reason: String },

    #[error("failed to communicate with '{uri}'")]
    Connection {
        uri: String,
        #[source]
        source: TransportError,
    },

    #[error("response body from '{uri}' is not valid UTF-8")]
    Utf8 {
        uri: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("response body from '{uri}' is not valid JSON")]
    Json {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response body from '{uri}' is a JSON {found}, expected an object")]
    NotAnObject { uri: String, found: &'static str },
}

impl FetchError {
    /// True for failures to reach or talk to the server.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            FetchError::Connection { .. } | FetchError::InvalidRequest { .. }
        )
    }

    /// True when a response arrived but its body could not be decoded.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            FetchError::Utf8 { .. } | FetchError::Json { .. } | FetchError::NotAnObject { .. }
        )
    }

    pub fn uri(&self) -> &str {
        match self {
            FetchError::InvalidRequest { uri, .. }
            | FetchError::Connection { uri, .. }
            | FetchError::Utf8 { uri, .. }
            | FetchError::Json { uri, .. }
            | FetchError::NotAnObject { uri, .. } => uri,
        }
    }
}
