#![allow(clippy::unwrap_used, clippy::expect_used)]

use apiprobe_application::ports::{AuthenticationRequest, AuthenticationScheme};
use apiprobe_application::{AuthenticationPipeline, IdentityOverride};
use apiprobe_domain::{AuthOutcome, Claim, IdentityConfig, Subject};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use super::{Authenticated, install};

struct ApiKeyScheme;

impl AuthenticationScheme for ApiKeyScheme {
    fn name(&self) -> &str {
        "ApiKey"
    }

    fn authenticate(&self, request: &AuthenticationRequest) -> AuthOutcome {
        match request.headers.get("x-api-key") {
            Some("secret") => AuthOutcome::Success(Subject::new("ApiKey", vec![Claim::new("sub", "service")])),
            _ => AuthOutcome::failure("missing or invalid api key"),
        }
    }
}

async fn whoami(Authenticated(subject): Authenticated) -> String {
    let claims: Vec<String> = subject
        .claims
        .iter()
        .map(|c| format!("{}={}", c.claim_type, c.value))
        .collect();
    claims.join(",")
}

fn app(pipeline: AuthenticationPipeline) -> Router {
    install(
        Router::new()
            .route("/me", get(whoami))
            .route("/health", get(|| async { "ok" })),
        pipeline,
    )
}

async fn call(router: Router, uri: &str, api_key: Option<&str>) -> (StatusCode, Option<String>, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }
    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, challenge, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn real_scheme_challenges_without_credentials() {
    let mut pipeline = AuthenticationPipeline::new();
    pipeline.register(ApiKeyScheme);

    let (status, challenge, _) = call(app(pipeline.clone()), "/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("ApiKey"));

    let (status, _, body) = call(app(pipeline), "/me", Some("secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "sub=service");
}

#[tokio::test]
async fn override_identity_reaches_the_handler() {
    let mut pipeline = AuthenticationPipeline::new();
    pipeline.register(ApiKeyScheme);
    let config = IdentityConfig::builder()
        .user_id("u1")
        .add_claim(("role", "admin"))
        .unwrap()
        .build()
        .unwrap();
    pipeline.override_identity(IdentityOverride::new(config)).unwrap();

    let (status, _, body) = call(app(pipeline), "/me", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "sub=u1,role=admin");
}

#[tokio::test]
async fn simulated_anonymous_gets_override_challenge() {
    let mut pipeline = AuthenticationPipeline::new();
    pipeline.register(ApiKeyScheme);
    pipeline
        .override_identity(IdentityOverride::new(IdentityConfig::anonymous()))
        .unwrap();

    let (status, challenge, _) = call(app(pipeline.clone()), "/me", Some("secret")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("override-auth-for-testing"));

    // Unprotected routes are unaffected.
    let (status, _, body) = call(app(pipeline), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn extractor_without_middleware_is_a_server_error() {
    let router = Router::new().route("/me", get(whoami));
    let (status, _, _) = call(router, "/me", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
