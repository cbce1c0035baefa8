#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use apiprobe_domain::{
    DomainError, Header, Headers, HttpMethod, JsonFormat, RawResponse, RequestBody, RequestSpec,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde::Serialize;

use super::{CallOptions, RequestExecutor};
use crate::error::ApplicationError;
use crate::ports::{HttpTransport, TransportError, TransportFuture};

/// Transport that records requests and replays canned responses.
#[derive(Default)]
struct StubTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    sent: Mutex<Vec<RequestSpec>>,
    closed: AtomicUsize,
}

impl StubTransport {
    fn replying(responses: impl IntoIterator<Item = Result<RawResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        })
    }

    fn sent(&self) -> Vec<RequestSpec> {
        self.sent.lock().clone()
    }
}

impl HttpTransport for StubTransport {
    fn send<'a>(&'a self, request: &'a RequestSpec) -> TransportFuture<'a> {
        self.sent.lock().push(request.clone());
        let next = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, Headers::new(), Vec::new())));
        Box::pin(async move { next })
    }

    fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Lines(Mutex<Vec<String>>);

impl Lines {
    fn all(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

fn ok(status: u16, body: &str) -> Result<RawResponse, TransportError> {
    Ok(RawResponse::new(status, Headers::new(), body.as_bytes().to_vec()))
}

fn executor(transport: &Arc<StubTransport>, lines: &Arc<Lines>) -> RequestExecutor {
    let lines = Arc::clone(lines);
    RequestExecutor::builder()
        .shared_transport(transport.clone())
        .base_url("http://localhost:5000/")
        .default_header("Accept", "application/json")
        .default_header("X-Tenant", "a")
        .default_header("X-Tenant", "b")
        .sink(move |text: &str| lines.0.lock().push(text.to_string()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn health_check_succeeds_and_renders_pretty_json() {
    let transport = StubTransport::replying([ok(200, r#"{"status":"ok"}"#)]);
    let lines = Arc::new(Lines::default());
    let api = executor(&transport, &lines);

    let response = api.get("/health", CallOptions::new()).await.unwrap();

    assert_eq!(response.rendered_body().unwrap(), "{\n  \"status\": \"ok\"\n}");
    assert_eq!(transport.sent()[0].url.as_str(), "http://localhost:5000/health");
    assert_eq!(lines.all().len(), 1);
    assert!(lines.all()[0].starts_with("Request\nGET http://localhost:5000/health"));
}

#[tokio::test]
async fn non_success_status_fails_after_tracing() {
    #[derive(Serialize)]
    struct Item<'a> {
        name: &'a str,
    }

    let transport = StubTransport::replying([ok(404, "Not Found")]);
    let lines = Arc::new(Lines::default());
    let api = executor(&transport, &lines);

    let err = api
        .post_json("/items", &Item { name: "x" }, CallOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NonSuccessStatus { status: 404, ref body }) if body == "Not Found"
    ));
    assert_eq!(err.status(), Some(404));
    let trace = &lines.all()[0];
    assert!(trace.contains("POST http://localhost:5000/items"));
    assert!(trace.ends_with("Body: Not Found"));
}

#[tokio::test]
async fn allow_failure_returns_the_response() {
    let transport = StubTransport::replying([ok(401, "")]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    let response = api.delete("/items/1", CallOptions::allow_failure()).await.unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(transport.sent()[0].method, HttpMethod::Delete);
}

#[tokio::test]
async fn default_headers_go_first_and_keep_duplicates() {
    let transport = StubTransport::replying([ok(200, ""), ok(200, "")]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    api.get("/a", CallOptions::new()).await.unwrap();
    api.options("/b", CallOptions::new()).await.unwrap();

    for request in transport.sent() {
        let names: Vec<_> = request.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Accept", "X-Tenant", "X-Tenant"]);
        assert_eq!(
            request.headers.get_all("x-tenant").collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }
}

#[tokio::test]
async fn pre_send_hook_applies_to_one_call_only() {
    let transport = StubTransport::replying([ok(200, ""), ok(200, "")]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    api.get(
        "/me",
        CallOptions::new().before_send(|request| {
            request.headers.append(Header::new("Authorization", "Bearer one-off"));
        }),
    )
    .await
    .unwrap();
    api.get("/me", CallOptions::new()).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].headers.get("authorization"), Some("Bearer one-off"));
    assert_eq!(sent[1].headers.get("authorization"), None);
}

#[tokio::test]
async fn hook_can_drop_a_default_header() {
    let transport = StubTransport::replying([ok(200, "")]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    api.get("/", CallOptions::new().before_send(|r| r.headers.remove("x-tenant")))
        .await
        .unwrap();

    assert!(!transport.sent()[0].headers.contains("X-Tenant"));
}

#[tokio::test]
async fn json_payload_uses_executor_format_without_escaping() {
    let transport = StubTransport::replying([ok(201, ""), ok(200, "")]);
    let lines = Arc::new(Lines::default());
    let compact = RequestExecutor::builder()
        .shared_transport(transport.clone())
        .base_url("http://localhost/")
        .json_format(JsonFormat::compact())
        .build()
        .unwrap();

    compact
        .put_json("/users/1", &serde_json::json!({"name": "Zoë", "tags": ["ü"]}), CallOptions::new())
        .await
        .unwrap();
    executor(&transport, &lines)
        .patch_json("/users/1", &serde_json::json!({"name": "Zoë"}), CallOptions::new())
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].method, HttpMethod::Put);
    assert_eq!(sent[0].body, RequestBody::json(r#"{"name":"Zoë","tags":["ü"]}"#));
    assert_eq!(sent[1].method, HttpMethod::Patch);
    assert_eq!(sent[1].body, RequestBody::json("{\n  \"name\": \"Zoë\"\n}"));
}

#[tokio::test]
async fn multipart_upload_reads_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    std::fs::write(&path, b"id,name\n1,x\n").unwrap();

    let transport = StubTransport::replying([ok(200, "")]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    api.post_multipart_file("/upload", &path, CallOptions::new())
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(
        sent[0].body,
        RequestBody::file("report.csv", b"id,name\n1,x\n".to_vec())
    );
}

#[tokio::test]
async fn multipart_upload_of_missing_file_fails_before_sending() {
    let transport = StubTransport::replying([]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    let err = api
        .post_multipart_file("/upload", "/definitely/not/here.bin", CallOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Io { .. }));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn transport_failure_is_traced_and_propagated() {
    let transport = StubTransport::replying([Err(TransportError::ConnectionFailed(
        "connection refused".to_string(),
    ))]);
    let lines = Arc::new(Lines::default());
    let api = executor(&transport, &lines);

    let err = api.get("/health", CallOptions::new()).await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Transport(TransportError::ConnectionFailed(_))
    ));
    assert!(lines.all()[0].ends_with("No response\nError: connection failed: connection refused"));
}

#[tokio::test]
async fn raw_send_is_untouched_and_still_asserts() {
    let transport = StubTransport::replying([ok(200, "{\"a\":1}"), ok(500, "boom")]);
    let lines = Arc::new(Lines::default());
    let api = executor(&transport, &lines);

    let raw = api.get_raw("/raw", CallOptions::new()).await.unwrap();
    assert_eq!(raw.body, b"{\"a\":1}".to_vec());

    let err = api.get_raw("/raw", CallOptions::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(lines.all().len(), 2);
}

#[tokio::test]
async fn dispose_is_idempotent_and_blocks_further_calls() {
    let transport = StubTransport::replying([]);
    let api = executor(&transport, &Arc::new(Lines::default()));

    api.dispose();
    api.dispose();
    assert!(api.is_disposed());
    assert!(matches!(
        api.get("/health", CallOptions::new()).await,
        Err(ApplicationError::Disposed)
    ));

    drop(api);
    assert_eq!(transport.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn drop_releases_the_transport_after_a_failed_assertion() {
    let transport = StubTransport::replying([ok(500, "boom")]);
    {
        let api = executor(&transport, &Arc::new(Lines::default()));
        assert!(api.get("/", CallOptions::new()).await.is_err());
    }
    assert_eq!(transport.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn transport_is_required() {
    assert!(matches!(
        RequestExecutor::builder().build(),
        Err(ApplicationError::Domain(DomainError::MissingRequiredArgument("transport")))
    ));
}

#[test]
fn invalid_default_header_is_rejected_at_construction() {
    let result = RequestExecutor::builder()
        .transport(StubTransport::default())
        .default_header("Bad Header", "x")
        .build();
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidHeaderName(_)))
    ));
}

#[tokio::test]
async fn relative_path_without_base_url_is_rejected() {
    let api = RequestExecutor::builder()
        .transport(StubTransport::default())
        .build()
        .unwrap();
    assert!(matches!(
        api.get("/health", CallOptions::new()).await,
        Err(ApplicationError::Domain(DomainError::InvalidUrl(_)))
    ));
}

#[tokio::test]
async fn missing_sink_is_a_no_op() {
    let api = RequestExecutor::builder()
        .transport(StubTransport::default())
        .shared_sink(None)
        .build()
        .unwrap();
    let response = api
        .get("http://localhost/absolute", CallOptions::new())
        .await
        .unwrap();
    assert!(response.is_success());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn json_sends_run_on_spawned_tasks() {
    let transport = StubTransport::replying((0..8).map(|_| ok(201, "")));
    let lines = Arc::new(Lines::default());
    let api = Arc::new(executor(&transport, &lines));

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let api = Arc::clone(&api);
            tokio::spawn(async move {
                let item = serde_json::json!({ "n": n });
                api.put_json("/items", &item, CallOptions::new()).await
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().status().as_u16(), 201);
    }

    assert_eq!(transport.sent().len(), 8);
    assert_eq!(lines.all().len(), 8);
}
