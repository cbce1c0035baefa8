//! Untouched transport response

use std::time::Duration;

use super::{AssertableResponse, StatusCode};
use crate::error::{DomainError, DomainResult};
use crate::request::Headers;

/// Response exactly as the transport returned it: body bytes are not decoded
/// or reformatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Protocol version as reported by the transport (e.g. "HTTP/1.1")
    pub version: String,
    /// Response headers in wire order
    pub headers: Headers,
    /// Body bytes
    pub body: Vec<u8>,
    /// Time from send to fully read body
    pub elapsed: Duration,
}

impl RawResponse {
    /// Creates a response with no version information and zero elapsed time.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, headers: Headers, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: status.into(),
            version: String::new(),
            headers,
            body: body.into(),
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fails with [`DomainError::NonSuccessStatus`] outside [200, 300).
    ///
    /// # Errors
    ///
    /// Returns the status and the decoded body when the status is not 2xx.
    pub fn ensure_success(&self) -> DomainResult<()> {
        if self.status.is_success() {
            return Ok(());
        }
        Err(DomainError::NonSuccessStatus {
            status: self.status.as_u16(),
            body: self.text(),
        })
    }

    /// Captures the response into an [`AssertableResponse`].
    #[must_use]
    pub fn into_assertable(self) -> AssertableResponse {
        let body = match String::from_utf8(self.body) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        AssertableResponse::new(self.status, body, self.headers)
    }
}
