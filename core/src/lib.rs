//! Console and HTTP helpers for the ORT configuration tool.
//!
//! # Overview
//! - `prompt_yes_no` asks an interactive yes/no question.
//! - `fetch_text` GETs a URI and returns the body as UTF-8 text.
//! - `fetch_json` GETs a URI and returns the body as a JSON object.
//!
//! # Design
//! - All calls are blocking and stateless; nothing is retained between them.
//! - Fetches never fail on a non-2xx status. The status is logged through
//!   `tracing` and the body is returned for the caller to inspect.
//! - The network sits behind the `Transport` trait. `UreqTransport` is the
//!   default; tests substitute canned responses.
//! - Installing a `tracing` subscriber is the caller's job.

pub mod error;
pub mod fetch;
pub mod http;
pub mod options;
pub mod prompt;

pub use error::{FetchError, PromptError, TransportError};
pub use fetch::{fetch_json, fetch_text, Fetcher};
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use options::FetchOptions;
pub use prompt::{prompt_yes_no, prompt_yes_no_with, Answer};
