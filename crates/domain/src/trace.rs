//! Human-readable request/response traces

use std::fmt;

use crate::json::JsonFormat;
use crate::request::RequestSpec;
use crate::response::{AssertableResponse, RawResponse};

/// One formatted exchange, produced per call and handed to a diagnostic sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticTrace {
    text: String,
}

impl DiagnosticTrace {
    /// Trace of a request and its captured response.
    #[must_use]
    pub fn exchange(request: &RequestSpec, response: &AssertableResponse, format: JsonFormat) -> Self {
        let text = format!(
            "{}\nResponse\n{}",
            describe_request(request, format),
            response.describe()
        );
        Self { text }
    }

    /// Trace of a request and a raw response. The body is decoded for display only.
    #[must_use]
    pub fn raw_exchange(request: &RequestSpec, response: &RawResponse, format: JsonFormat) -> Self {
        let described = response
            .clone()
            .into_assertable()
            .with_json_format(format)
            .describe();
        let text = format!(
            "{}\nResponse ({})\n{}",
            describe_request(request, format),
            if response.version.is_empty() { "raw" } else { response.version.as_str() },
            described
        );
        Self { text }
    }

    /// Trace of a request that never produced a response.
    #[must_use]
    pub fn failed(request: &RequestSpec, error: &dyn fmt::Display, format: JsonFormat) -> Self {
        let text = format!(
            "{}\nNo response\nError: {error}",
            describe_request(request, format)
        );
        Self { text }
    }

    /// The formatted text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for DiagnosticTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn describe_request(request: &RequestSpec, format: JsonFormat) -> String {
    let headers = format
        .to_string(&request.effective_headers().to_json())
        .unwrap_or_else(|_| "{}".to_string());
    let mut text = format!(
        "Request\n{} {}\nHeaders: {headers}",
        request.method, request.url
    );
    if !request.body.is_empty() {
        text.push_str("\nBody: ");
        text.push_str(&request.body.summary());
    }
    text
}
