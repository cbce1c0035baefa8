//! Test-only identity provider.
//!
//! Answers every authentication decision from an [`IdentityConfig`] instead of
//! looking at credentials.

use std::sync::Arc;

use apiprobe_domain::{AuthOutcome, IdentityConfig, Subject};

use crate::ports::{AuthenticationRequest, AuthenticationScheme};

/// Scheme name reported by the override.
pub const OVERRIDE_SCHEME: &str = "override-auth-for-testing";

/// Authentication scheme that impersonates a configured identity, or fails
/// every request when anonymous simulation is on.
#[derive(Debug, Clone)]
pub struct IdentityOverride {
    config: Arc<IdentityConfig>,
}

impl IdentityOverride {
    /// Creates the provider. The configuration is shared read-only.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// The outcome this provider produces, independent of the request.
    #[must_use]
    pub fn outcome(&self) -> AuthOutcome {
        if self.config.simulate_anonymous() {
            return AuthOutcome::failure("simulation of failed authentication, i.e. an anonymous user");
        }
        AuthOutcome::Success(Subject::new(OVERRIDE_SCHEME, self.config.claims()))
    }
}

impl AuthenticationScheme for IdentityOverride {
    fn name(&self) -> &str {
        OVERRIDE_SCHEME
    }

    fn authenticate(&self, request: &AuthenticationRequest) -> AuthOutcome {
        let outcome = self.outcome();
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            authenticated = outcome.is_success(),
            user_id = self.config.user_id(),
            "identity override decided authentication"
        );
        outcome
    }
}
