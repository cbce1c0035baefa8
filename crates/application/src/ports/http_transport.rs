//! HTTP transport port

use std::future::Future;
use std::pin::Pin;

use apiprobe_domain::{RawResponse, RequestSpec};
use thiserror::Error;

/// Errors raised by a transport before a complete response is available.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The URL could not be used by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The body could not be encoded for the wire.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The transport was closed.
    #[error("transport has been closed")]
    Closed,

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

/// Future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>>;

/// Port for sending one HTTP request and reading the full response.
///
/// Implementations must be safe to call concurrently; the executor never
/// mutates them after construction.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and reads the whole body before resolving.
    fn send<'a>(&'a self, request: &'a RequestSpec) -> TransportFuture<'a>;

    /// Releases the underlying connection resources.
    ///
    /// Called exactly once by the owning executor.
    fn close(&self);
}
