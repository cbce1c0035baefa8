//! Sample application hosted by the integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use apiprobe::{
    AuthOutcome, AuthenticationPipeline, AuthenticationRequest, AuthenticationScheme,
    Authenticated, Claim, HarnessSettings, Subject, install_authentication,
};
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// The app's real scheme: `Authorization: Bearer <user>`.
pub struct BearerScheme;

impl AuthenticationScheme for BearerScheme {
    fn name(&self) -> &str {
        "Bearer"
    }

    fn authenticate(&self, request: &AuthenticationRequest) -> AuthOutcome {
        match request
            .headers
            .get("authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
        {
            Some(user) => AuthOutcome::Success(Subject::new("Bearer", vec![Claim::new("sub", user)])),
            None => AuthOutcome::failure("missing bearer token"),
        }
    }
}

/// Builds the sample app, registering the real scheme next to any override.
pub fn app(mut pipeline: AuthenticationPipeline) -> Router {
    pipeline.register(BearerScheme);
    let router = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route("/items", post(|| async { (StatusCode::NOT_FOUND, "Not Found") }))
        .route("/me", get(me))
        .route("/upload", post(upload))
        .route("/headers", get(echo_headers));
    install_authentication(router, pipeline)
}

async fn me(Authenticated(subject): Authenticated) -> Json<Value> {
    let claims: serde_json::Map<String, Value> = subject
        .claims
        .iter()
        .map(|c| (c.claim_type.clone(), Value::String(c.value.clone())))
        .collect();
    Json(json!({ "id": subject.id(), "scheme": subject.scheme, "claims": claims }))
}

async fn upload(mut multipart: Multipart) -> Json<Value> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let size = field.bytes().await.unwrap().len();
        parts.push(json!({
            "field": name,
            "file_name": file_name,
            "content_type": content_type,
            "size": size,
        }));
    }
    Json(Value::Array(parts))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let values = |name: &str| -> Vec<String> {
        headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    };
    Json(json!({
        "x-tenant": values("x-tenant"),
        "x-request-tag": values("x-request-tag"),
        "user-agent": values("user-agent"),
    }))
}

/// Settings that never read the environment.
pub fn settings() -> HarnessSettings {
    HarnessSettings {
        user_agent: "apiprobe-tests".to_string(),
        ..HarnessSettings::default()
    }
}
