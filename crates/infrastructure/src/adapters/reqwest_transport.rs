//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest library.
//! It sends one request, reads the whole body and reports the exchange as a
//! `RawResponse`.

use std::time::{Duration, Instant};

use apiprobe_application::ports::{HttpTransport, TransportError, TransportFuture};
use apiprobe_domain::{HttpMethod, RawResponse, RequestSpec};
use parking_lot::RwLock;
use reqwest::{Client, Method};

use crate::http::{BuiltBody, build_body, collect_headers};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("apiprobe/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects followed.
const MAX_REDIRECTS: usize = 10;

/// Options for building a [`ReqwestTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP transport implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpTransport` port from the
/// application layer. After [`HttpTransport::close`] every send fails with
/// [`TransportError::Closed`].
pub struct ReqwestTransport {
    client: RwLock<Option<Client>>,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: `apiprobe/<version>`
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(&TransportOptions::default())
    }

    /// Creates a transport with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_options(options: &TransportOptions) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client: RwLock::new(Some(client)),
            timeout_ms: duration_ms(options.timeout),
        })
    }

    /// Creates a transport around a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self {
            client: RwLock::new(Some(client)),
            timeout_ms: duration_ms(timeout),
        }
    }

    /// Returns true once the transport has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.client.read().is_none()
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_builder() {
            return TransportError::InvalidBody(error.to_string());
        }
        if error.is_redirect() {
            return TransportError::Other(format!("too many redirects (max {MAX_REDIRECTS})"));
        }
        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: &'a RequestSpec) -> TransportFuture<'a> {
        Box::pin(async move {
            let client = self.client.read().clone().ok_or(TransportError::Closed)?;
            let body = build_body(&request.body)
                .map_err(|e| TransportError::InvalidBody(e.to_string()))?;

            let start = Instant::now();

            let mut builder =
                client.request(Self::to_reqwest_method(request.method), request.url.clone());

            for header in request.effective_headers().iter() {
                builder = builder.header(header.name.as_str(), header.value.as_str());
            }

            builder = match body {
                BuiltBody::None => builder,
                BuiltBody::Text { content, .. } => builder.body(content),
                BuiltBody::Multipart(form) => builder.multipart(form),
            };

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

            let status = response.status().as_u16();
            let version = format!("{:?}", response.version());
            let headers = collect_headers(response.headers());

            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            let mut raw = RawResponse::new(status, headers, body);
            raw.version = version;
            raw.elapsed = start.elapsed();
            Ok(raw)
        })
    }

    fn close(&self) {
        if self.client.write().take().is_some() {
            tracing::debug!("reqwest transport closed");
        }
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout_ms", &self.timeout_ms)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, HeaderValue};
    use axum::routing::{get, post};
    use pretty_assertions::assert_eq;
    use url::Url;

    async fn serve(app: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestTransport::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestTransport::to_reqwest_method(HttpMethod::Patch), Method::PATCH);
        assert_eq!(ReqwestTransport::to_reqwest_method(HttpMethod::Options), Method::OPTIONS);
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new().unwrap();
        assert!(!transport.is_closed());
    }

    #[tokio::test]
    async fn test_send_reads_status_headers_and_body() {
        let app = Router::new().route(
            "/health",
            get(|| async {
                let mut headers = HeaderMap::new();
                headers.append("x-echo", HeaderValue::from_static("1"));
                headers.append("x-echo", HeaderValue::from_static("2"));
                (headers, r#"{"status":"ok"}"#)
            }),
        );
        let base = serve(app).await;
        let transport = ReqwestTransport::new().unwrap();

        let request = RequestSpec::new(HttpMethod::Get, base.join("health").unwrap());
        let raw = transport.send(&request).await.unwrap();

        assert_eq!(raw.status.as_u16(), 200);
        assert_eq!(raw.version, "HTTP/1.1");
        assert_eq!(raw.text(), r#"{"status":"ok"}"#);
        assert_eq!(raw.headers.get_all("x-echo").collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_send_json_body_with_content_type() {
        let app = Router::new().route(
            "/echo",
            post(|headers: HeaderMap, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                format!("{content_type}|{body}")
            }),
        );
        let base = serve(app).await;
        let transport = ReqwestTransport::new().unwrap();

        let request = RequestSpec::new(HttpMethod::Post, base.join("echo").unwrap())
            .with_body(apiprobe_domain::RequestBody::json(r#"{"name":"Zoë"}"#));
        let raw = transport.send(&request).await.unwrap();

        assert_eq!(raw.text(), r#"application/json; charset=utf-8|{"name":"Zoë"}"#);
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new().unwrap();
        let request = RequestSpec::new(
            HttpMethod::Get,
            Url::parse(&format!("http://{addr}/")).unwrap(),
        );
        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, TransportError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_closed_transport_rejects_sends() {
        let transport = ReqwestTransport::new().unwrap();
        transport.close();
        transport.close();

        let request = RequestSpec::new(HttpMethod::Get, Url::parse("http://127.0.0.1:1/").unwrap());
        assert_eq!(transport.send(&request).await, Err(TransportError::Closed));
        assert!(transport.is_closed());
    }
}
