//! Request executor.
//!
//! Every verb is a thin request builder on top of [`RequestExecutor::execute`],
//! which applies default headers and the pre-send hook, sends through the
//! transport, captures the response, emits a diagnostic trace and finally
//! asserts the status when asked to.

mod builder;
mod options;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use apiprobe_domain::{
    AssertableResponse, DiagnosticTrace, Headers, HttpMethod, JsonFormat, RawResponse,
    RequestBody, RequestSpec, request::resolve_url,
};
use serde::Serialize;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

pub use builder::RequestExecutorBuilder;
pub use options::{CallOptions, PreSendHook};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{DiagnosticSink, HttpTransport};

/// Sends HTTP requests and turns responses into [`AssertableResponse`]s.
///
/// Owns its transport exclusively; [`RequestExecutor::dispose`] (or drop)
/// releases it exactly once. Methods take `&self`, so one executor can serve
/// concurrent calls.
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    base_url: Option<Url>,
    default_headers: Headers,
    sink: Option<Arc<dyn DiagnosticSink>>,
    json: JsonFormat,
    disposed: AtomicBool,
}

impl RequestExecutor {
    /// Starts building an executor.
    #[must_use]
    pub fn builder() -> RequestExecutorBuilder {
        RequestExecutorBuilder::default()
    }

    /// Base URL relative paths are joined to.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Headers added to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// JSON format used for payloads and rendered bodies.
    #[must_use]
    pub const fn json_format(&self) -> JsonFormat {
        self.json
    }

    /// `GET path`
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub async fn get(&self, path: &str, call: CallOptions<'_>) -> ApplicationResult<AssertableResponse> {
        self.send(HttpMethod::Get, path, RequestBody::Empty, call).await
    }

    /// `POST path` with `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`apiprobe_domain::DomainError::Serialization`] if `value` cannot
    /// be serialized; otherwise see [`RequestExecutor::execute`].
    pub async fn post_json<T: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        value: &T,
        call: CallOptions<'_>,
    ) -> ApplicationResult<AssertableResponse> {
        let body = self.json_body(value)?;
        self.send(HttpMethod::Post, path, body, call).await
    }

    /// `PUT path` with `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`RequestExecutor::post_json`].
    pub async fn put_json<T: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        value: &T,
        call: CallOptions<'_>,
    ) -> ApplicationResult<AssertableResponse> {
        let body = self.json_body(value)?;
        self.send(HttpMethod::Put, path, body, call).await
    }

    /// `PATCH path` with `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`RequestExecutor::post_json`].
    pub async fn patch_json<T: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        value: &T,
        call: CallOptions<'_>,
    ) -> ApplicationResult<AssertableResponse> {
        let body = self.json_body(value)?;
        self.send(HttpMethod::Patch, path, body, call).await
    }

    /// `DELETE path`
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub async fn delete(&self, path: &str, call: CallOptions<'_>) -> ApplicationResult<AssertableResponse> {
        self.send(HttpMethod::Delete, path, RequestBody::Empty, call).await
    }

    /// `OPTIONS path`
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub async fn options(&self, path: &str, call: CallOptions<'_>) -> ApplicationResult<AssertableResponse> {
        self.send(HttpMethod::Options, path, RequestBody::Empty, call).await
    }

    /// `HEAD path`
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub async fn head(&self, path: &str, call: CallOptions<'_>) -> ApplicationResult<AssertableResponse> {
        self.send(HttpMethod::Head, path, RequestBody::Empty, call).await
    }

    /// `POST path` uploading one file as `multipart/form-data`.
    ///
    /// The file is read fully into memory; the form field is `files` and the
    /// file name is the base name of `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Io`] if the file cannot be read; otherwise
    /// see [`RequestExecutor::execute`].
    pub async fn post_multipart_file(
        &self,
        path: &str,
        file: impl AsRef<Path>,
        call: CallOptions<'_>,
    ) -> ApplicationResult<AssertableResponse> {
        self.ensure_open()?;
        let file = file.as_ref();
        let content = tokio::fs::read(file).await.map_err(|e| ApplicationError::Io {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        self.send(HttpMethod::Post, path, RequestBody::file(file_name, content), call)
            .await
    }

    /// Sends any method and body to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`apiprobe_domain::DomainError::InvalidUrl`] if `path` cannot be
    /// resolved; otherwise see [`RequestExecutor::execute`].
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        call: CallOptions<'_>,
    ) -> ApplicationResult<AssertableResponse> {
        let request = self.request(method, path)?.with_body(body);
        self.execute(request, call).await
    }

    /// `GET path` returning the untouched transport response.
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::send_raw`].
    pub async fn get_raw(&self, path: &str, call: CallOptions<'_>) -> ApplicationResult<RawResponse> {
        let request = self.request(HttpMethod::Get, path)?;
        self.send_raw(request, call).await
    }

    /// Builds a request for `path` resolved against the base URL.
    ///
    /// Default headers are not copied in; [`RequestExecutor::execute`] adds them.
    ///
    /// # Errors
    ///
    /// Returns [`apiprobe_domain::DomainError::InvalidUrl`] if `path` cannot be resolved.
    pub fn request(&self, method: HttpMethod, path: &str) -> ApplicationResult<RequestSpec> {
        let url = resolve_url(self.base_url.as_ref(), path)?;
        Ok(RequestSpec::new(method, url))
    }

    /// Sends a prepared request and captures the response.
    ///
    /// The diagnostic trace is emitted before the status is asserted, and also
    /// when the transport fails.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Disposed`] after [`RequestExecutor::dispose`]
    /// - [`ApplicationError::Transport`] when no response was received
    /// - [`apiprobe_domain::DomainError::NonSuccessStatus`] when the status is
    ///   not 2xx and the call asserts success
    pub async fn execute(
        &self,
        request: RequestSpec,
        call: CallOptions<'_>,
    ) -> ApplicationResult<AssertableResponse> {
        let ensure_success = call.ensure_success;
        let (request, raw) = self.transmit(request, call).await?;

        let response = raw.into_assertable().with_json_format(self.json);
        self.emit(&DiagnosticTrace::exchange(&request, &response, self.json));

        if ensure_success {
            response.ensure_success()?;
        }
        Ok(response)
    }

    /// Sends a prepared request and returns the transport response untouched.
    ///
    /// Traces and asserts exactly like [`RequestExecutor::execute`].
    ///
    /// # Errors
    ///
    /// Same as [`RequestExecutor::execute`].
    pub async fn send_raw(
        &self,
        request: RequestSpec,
        call: CallOptions<'_>,
    ) -> ApplicationResult<RawResponse> {
        let ensure_success = call.ensure_success;
        let (request, raw) = self.transmit(request, call).await?;

        self.emit(&DiagnosticTrace::raw_exchange(&request, &raw, self.json));

        if ensure_success {
            raw.ensure_success()?;
        }
        Ok(raw)
    }

    /// Releases the transport. Later calls are no-ops.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            self.transport.close();
            tracing::debug!("request executor disposed");
        }
    }

    /// Returns true after [`RequestExecutor::dispose`].
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    async fn transmit(
        &self,
        mut request: RequestSpec,
        call: CallOptions<'_>,
    ) -> ApplicationResult<(RequestSpec, RawResponse)> {
        self.ensure_open()?;

        if !self.default_headers.is_empty() {
            let mut headers = self.default_headers.clone();
            headers.extend(&request.headers);
            request.headers = headers;
        }
        if let Some(hook) = call.pre_send {
            hook(&mut request);
        }

        let call_id = Uuid::now_v7();
        let span = tracing::debug_span!(
            "http_call",
            %call_id,
            method = %request.method,
            url = %request.url,
        );

        let sent = async {
            match self.transport.send(&request).await {
                Ok(raw) => {
                    tracing::debug!(
                        status = raw.status.as_u16(),
                        elapsed_ms = u64::try_from(raw.elapsed.as_millis()).unwrap_or(u64::MAX),
                        "response received"
                    );
                    Ok(raw)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "request failed before a response was received");
                    self.emit(&DiagnosticTrace::failed(&request, &e, self.json));
                    Err(ApplicationError::Transport(e))
                }
            }
        }
        .instrument(span)
        .await;
        sent.map(|raw| (request, raw))
    }

    fn json_body<T: Serialize + ?Sized>(&self, value: &T) -> ApplicationResult<RequestBody> {
        Ok(RequestBody::json(self.json.to_string(value)?))
    }

    fn emit(&self, trace: &DiagnosticTrace) {
        if let Some(sink) = &self.sink {
            sink.write(trace.as_str());
        }
    }

    fn ensure_open(&self) -> ApplicationResult<()> {
        if self.is_disposed() {
            return Err(ApplicationError::Disposed);
        }
        Ok(())
    }
}

impl Drop for RequestExecutor {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("default_headers", &self.default_headers)
            .field("json", &self.json)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
