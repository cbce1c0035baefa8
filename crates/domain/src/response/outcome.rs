//! Assertable response
//!
//! Immutable capture of one completed HTTP exchange. The status code is the
//! only input to [`AssertableResponse::ensure_success`]; the body is kept raw
//! and only reformatted on demand.

use std::fmt;

use serde::de::DeserializeOwned;

use super::StatusCode;
use crate::error::{DomainError, DomainResult};
use crate::json::JsonFormat;
use crate::request::Headers;

/// Status, raw body and headers of a response, with assertion helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertableResponse {
    status: StatusCode,
    body: String,
    headers: Headers,
    format: JsonFormat,
}

impl AssertableResponse {
    /// Captures a response. No I/O, no validation.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, body: impl Into<String>, headers: Headers) -> Self {
        Self {
            status: status.into(),
            body: body.into(),
            headers,
            format: JsonFormat::default(),
        }
    }

    /// Uses `format` when rendering the body.
    #[must_use]
    pub const fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// The response status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The body exactly as received.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The response headers in wire order.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of the header `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Every value of the header `name`.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers.get_all(name).collect()
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body pretty-printed when it looks like JSON, unchanged otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedJsonBody`] when the body starts like
    /// JSON but does not parse.
    pub fn rendered_body(&self) -> DomainResult<String> {
        self.format.reformat(&self.body)
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedJsonBody`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> DomainResult<T> {
        serde_json::from_str(&self.body).map_err(|e| DomainError::MalformedJsonBody {
            message: e.to_string(),
            body: self.body.clone(),
        })
    }

    /// Fails unless the status code is in [200, 300).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonSuccessStatus`] carrying the status code and
    /// the raw body.
    pub fn ensure_success(&self) -> DomainResult<()> {
        if self.status.is_success() {
            return Ok(());
        }
        Err(DomainError::NonSuccessStatus {
            status: self.status.as_u16(),
            body: self.body.clone(),
        })
    }

    /// Fails unless the status code equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonSuccessStatus`] when the status differs.
    pub fn ensure_status(&self, expected: impl Into<StatusCode>) -> DomainResult<()> {
        if self.status == expected.into() {
            return Ok(());
        }
        Err(DomainError::NonSuccessStatus {
            status: self.status.as_u16(),
            body: self.body.clone(),
        })
    }

    /// Multi-line description: status line, headers as JSON, rendered body.
    ///
    /// Never fails; a malformed JSON body is shown raw with the parser error.
    #[must_use]
    pub fn describe(&self) -> String {
        let headers = self
            .format
            .to_string(&self.headers.to_json())
            .unwrap_or_else(|_| "{}".to_string());
        format!(
            "StatusCode: {}\nHeaders: {}\n{}",
            self.status,
            headers,
            self.describe_body()
        )
    }

    fn describe_body(&self) -> String {
        if self.body.trim().is_empty() {
            return "Body: (empty)".to_string();
        }
        match self.rendered_body() {
            Ok(rendered) => format!("Body: {rendered}"),
            Err(DomainError::MalformedJsonBody { message, .. }) => {
                format!("Body (malformed JSON: {message}): {}", self.body)
            }
            Err(_) => format!("Body: {}", self.body),
        }
    }
}

impl fmt::Display for AssertableResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
