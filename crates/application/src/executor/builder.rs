//! Construction of a [`RequestExecutor`].

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use apiprobe_domain::{DomainError, Headers, JsonFormat};
use url::Url;

use super::RequestExecutor;
use crate::error::ApplicationResult;
use crate::ports::{DiagnosticSink, HttpTransport};

/// Builder for [`RequestExecutor`].
#[derive(Default)]
pub struct RequestExecutorBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    json: JsonFormat,
}

impl RequestExecutorBuilder {
    /// Sets the transport. Required.
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets an already shared transport. Required unless [`Self::transport`] is used.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Base URL that relative paths are joined to.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Adds a header sent with every request. Duplicates are kept in order.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Adds several default headers.
    #[must_use]
    pub fn default_headers<I, N, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.default_headers
            .extend(headers.into_iter().map(|(n, v)| (n.into(), v.into())));
        self
    }

    /// Sets the diagnostic sink. Without one, traces are discarded.
    #[must_use]
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Sets an already shared diagnostic sink.
    #[must_use]
    pub fn shared_sink(mut self, sink: Option<Arc<dyn DiagnosticSink>>) -> Self {
        self.sink = sink;
        self
    }

    /// JSON format used for payloads and rendered bodies.
    #[must_use]
    pub const fn json_format(mut self, format: JsonFormat) -> Self {
        self.json = format;
        self
    }

    /// Validates the configuration and creates the executor.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingRequiredArgument`] without a transport
    /// - [`DomainError::InvalidUrl`] for an unparsable base URL
    /// - [`DomainError::InvalidHeaderName`] for an invalid default header
    pub fn build(self) -> ApplicationResult<RequestExecutor> {
        let transport = self
            .transport
            .ok_or(DomainError::MissingRequiredArgument("transport"))?;
        let base_url = self
            .base_url
            .map(|raw| Url::parse(&raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}"))))
            .transpose()?;
        let default_headers = Headers::parse_pairs(self.default_headers)?;

        tracing::debug!(
            base_url = base_url.as_ref().map(Url::as_str),
            default_headers = default_headers.len(),
            "request executor created"
        );

        Ok(RequestExecutor {
            transport,
            base_url,
            default_headers,
            sink: self.sink,
            json: self.json,
            disposed: AtomicBool::new(false),
        })
    }
}
