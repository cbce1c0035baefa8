//! axum middleware running the authentication pipeline.
//!
//! Every request is authenticated once, before routing reaches a handler.
//! The outcome is stored in the request extensions where
//! [`Authenticated`](super::Authenticated) picks it up.

use std::sync::Arc;

use apiprobe_application::AuthenticationPipeline;
use apiprobe_application::ports::AuthenticationRequest;
use apiprobe_domain::{AuthOutcome, HttpMethod};
use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;

use crate::http::collect_headers;

/// Outcome of authenticating one request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// What the deciding scheme concluded.
    pub outcome: AuthOutcome,
    /// Scheme named in challenges, if any scheme is registered.
    pub challenge_scheme: Option<String>,
}

/// Wraps `router` so each request is authenticated by `pipeline`.
pub fn install<S>(router: Router<S>, pipeline: AuthenticationPipeline) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(Arc::new(pipeline), authenticate))
}

async fn authenticate(
    State(pipeline): State<Arc<AuthenticationPipeline>>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = match request.method().as_str().parse::<HttpMethod>() {
        Ok(method) => pipeline.authenticate(&AuthenticationRequest {
            method,
            path: request.uri().path().to_string(),
            headers: collect_headers(request.headers()),
        }),
        Err(e) => AuthOutcome::failure(e.to_string()),
    };

    match &outcome {
        AuthOutcome::Success(subject) => tracing::debug!(
            scheme = %subject.scheme,
            subject = subject.id().unwrap_or_default(),
            path = %request.uri().path(),
            "request authenticated"
        ),
        AuthOutcome::Failure { reason } => tracing::debug!(
            %reason,
            path = %request.uri().path(),
            "request not authenticated"
        ),
    }

    request.extensions_mut().insert(AuthContext {
        outcome,
        challenge_scheme: pipeline.challenge_scheme().map(str::to_string),
    });
    next.run(request).await
}
