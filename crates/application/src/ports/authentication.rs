//! Authentication scheme port

use apiprobe_domain::{AuthOutcome, Headers, HttpMethod};

/// What a scheme may look at when deciding who the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    /// Request method
    pub method: HttpMethod,
    /// Request path (without query)
    pub path: String,
    /// Request headers
    pub headers: Headers,
}

/// A strategy that turns an incoming request into an [`AuthOutcome`].
///
/// The system under test registers its real schemes; tests install an
/// override that answers every decision on its own.
pub trait AuthenticationScheme: Send + Sync {
    /// Scheme name, used in challenges and on the resulting subject.
    fn name(&self) -> &str;

    /// Decides the outcome for one request.
    fn authenticate(&self, request: &AuthenticationRequest) -> AuthOutcome;
}
