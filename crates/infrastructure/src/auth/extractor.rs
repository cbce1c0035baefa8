//! Extractor for handlers that require an authenticated caller.

use apiprobe_domain::{AuthOutcome, Subject};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::middleware::AuthContext;

/// The authenticated caller.
///
/// Rejects with a `401 Unauthorized` challenge when authentication failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub Subject);

/// Why a protected handler refused the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// The caller is not authenticated.
    Challenge {
        /// Scheme advertised in `WWW-Authenticate`.
        scheme: Option<String>,
        /// Reason reported by the scheme.
        reason: String,
    },
    /// The route is not wrapped by the authentication middleware.
    MiddlewareMissing,
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<AuthContext>()
            .ok_or(AuthRejection::MiddlewareMissing)?;

        match &context.outcome {
            AuthOutcome::Success(subject) => Ok(Self(subject.clone())),
            AuthOutcome::Failure { reason } => Err(AuthRejection::Challenge {
                scheme: context.challenge_scheme.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Challenge { scheme, .. } => {
                let mut response = StatusCode::UNAUTHORIZED.into_response();
                if let Some(value) = scheme.and_then(|s| HeaderValue::from_str(&s).ok()) {
                    response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
                }
                response
            }
            Self::MiddlewareMissing => {
                tracing::error!("Authenticated extractor used on a route without authentication middleware");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
