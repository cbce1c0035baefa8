//! Conversion from wire header maps to domain headers.

use apiprobe_domain::{Header, Headers};
use reqwest::header::HeaderMap;

/// Copies a header map in iteration order. Non-UTF-8 values are decoded lossily.
#[must_use]
pub fn collect_headers(headers: &HeaderMap) -> Headers {
    headers
        .iter()
        .map(|(name, value)| Header::new(name.as_str(), String::from_utf8_lossy(value.as_bytes())))
        .collect()
}
