//! Per-request settings shared by `fetch_text` and `fetch_json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cookies and TLS verification for a single fetch.
///
/// Cookies are kept sorted by name so the generated `Cookie` header is
/// stable. Deserializes from configuration with every field optional:
///
/// ```
/// let opts: ort_core::FetchOptions =
///     serde_json::from_str(r#"{"cookies":{"mojolicious":"abc"}}"#).unwrap();
/// assert!(opts.verify);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub cookies: BTreeMap<String, String>,
    pub verify: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            cookies: BTreeMap::new(),
            verify: true,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// `name=value` pairs joined with `"; "`, or `None` without cookies.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let header = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(header)
    }
}
