//! Request specification type

use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// A fully resolved HTTP request, ready to hand to a transport.
///
/// This is the value a pre-send hook receives, so any change made to it
/// applies to exactly one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// Outgoing headers, default headers first
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request without headers or body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: RequestBody::Empty,
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(Header::new(name, value));
        self
    }

    /// Returns the headers that will go on the wire, including the
    /// content type implied by the body when none was set explicitly.
    #[must_use]
    pub fn effective_headers(&self) -> Headers {
        let mut headers = self.headers.clone();
        if let Some(content_type) = self.body.content_type()
            && !headers.contains("content-type")
        {
            headers.append(Header::new("Content-Type", content_type));
        }
        headers
    }
}

/// Resolves `target` against an optional base URL.
///
/// Absolute URLs are returned unchanged; relative references are joined to
/// the base following RFC 3986.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] when `target` is relative and no base
/// is configured, or when joining fails.
pub fn resolve_url(base: Option<&Url>, target: &str) -> DomainResult<Url> {
    match Url::parse(target) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or_else(|| {
                DomainError::InvalidUrl(format!("relative path '{target}' without a base URL"))
            })?;
            base.join(target)
                .map_err(|e| DomainError::InvalidUrl(format!("{e}: {target}")))
        }
        Err(e) => Err(DomainError::InvalidUrl(format!("{e}: {target}"))),
    }
}
