//! Authentication decision point of the system under test.
//!
//! The application registers its real schemes; the harness may install one
//! override ahead of them. An installed override is the only scheme consulted.

use std::fmt;
use std::sync::Arc;

use apiprobe_domain::AuthOutcome;

use super::identity_override::IdentityOverride;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{AuthenticationRequest, AuthenticationScheme};

/// Ordered set of authentication schemes plus an optional override.
#[derive(Clone, Default)]
pub struct AuthenticationPipeline {
    override_scheme: Option<Arc<dyn AuthenticationScheme>>,
    schemes: Vec<Arc<dyn AuthenticationScheme>>,
}

impl AuthenticationPipeline {
    /// Creates a pipeline with no schemes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a real scheme. The first registered scheme is the default.
    pub fn register(&mut self, scheme: impl AuthenticationScheme + 'static) -> &mut Self {
        self.schemes.push(Arc::new(scheme));
        self
    }

    /// Installs a scheme that takes priority over every registered one.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::OverrideAlreadyInstalled`] on a second call.
    pub fn install_override(
        &mut self,
        scheme: impl AuthenticationScheme + 'static,
    ) -> ApplicationResult<&mut Self> {
        if self.override_scheme.is_some() {
            return Err(ApplicationError::OverrideAlreadyInstalled);
        }
        tracing::info!(scheme = scheme.name(), "authentication override installed");
        self.override_scheme = Some(Arc::new(scheme));
        Ok(self)
    }

    /// Installs an [`IdentityOverride`].
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::OverrideAlreadyInstalled`] on a second call.
    pub fn override_identity(&mut self, provider: IdentityOverride) -> ApplicationResult<&mut Self> {
        self.install_override(provider)
    }

    /// Returns true if an override is installed.
    #[must_use]
    pub const fn is_overridden(&self) -> bool {
        self.override_scheme.is_some()
    }

    /// Name of the scheme that decides, used for challenges.
    #[must_use]
    pub fn challenge_scheme(&self) -> Option<&str> {
        self.deciding_scheme().map(|s| s.name())
    }

    /// Runs the deciding scheme for one request.
    ///
    /// Without any scheme the outcome is a failure.
    #[must_use]
    pub fn authenticate(&self, request: &AuthenticationRequest) -> AuthOutcome {
        match self.deciding_scheme() {
            Some(scheme) => scheme.authenticate(request),
            None => AuthOutcome::failure("no authentication scheme registered"),
        }
    }

    fn deciding_scheme(&self) -> Option<&Arc<dyn AuthenticationScheme>> {
        self.override_scheme.as_ref().or_else(|| self.schemes.first())
    }
}

impl fmt::Debug for AuthenticationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationPipeline")
            .field(
                "override_scheme",
                &self.override_scheme.as_ref().map(|s| s.name().to_string()),
            )
            .field(
                "schemes",
                &self.schemes.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
