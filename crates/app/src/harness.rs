//! Harness assembly.
//!
//! [`TestHarness`] is the composition root of a test: it hosts the app under
//! test (or points at an external endpoint), installs the identity override
//! and hands out a ready [`RequestExecutor`].

use std::fmt;
use std::sync::Arc;

use apiprobe_application::ports::DiagnosticSink;
use apiprobe_application::{
    ApplicationError, AuthenticationPipeline, IdentityOverride, RequestExecutor,
};
use apiprobe_domain::{DomainError, IdentityConfig, JsonFormat};
use apiprobe_infrastructure::{ReqwestTransport, TracingSink};
use axum::Router;
use thiserror::Error;
use url::Url;

use crate::config::HarnessSettings;
use crate::server::AppServer;

/// Errors raised while assembling a harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Executor or pipeline construction failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The in-process server could not be started.
    #[error("in-process server error: {0}")]
    Io(#[from] std::io::Error),

    /// An identity override was requested for an external endpoint.
    #[error("authentication can only be overridden for an in-process app")]
    OverrideRequiresApp,
}

impl From<DomainError> for HarnessError {
    fn from(error: DomainError) -> Self {
        Self::Application(error.into())
    }
}

type AppFactory = Box<dyn FnOnce(AuthenticationPipeline) -> Router + Send>;

enum Target {
    App(AppFactory),
    External(String),
}

/// Builder for [`TestHarness`].
#[derive(Default)]
pub struct HarnessBuilder {
    target: Option<Target>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    default_headers: Vec<(String, String)>,
    identity: Option<IdentityConfig>,
    settings: Option<HarnessSettings>,
    json: JsonFormat,
}

impl HarnessBuilder {
    /// Hosts the app built by `factory` in-process.
    ///
    /// The factory receives the authentication pipeline with any override
    /// already installed; it registers the app's real schemes and wraps the
    /// router with [`crate::install_authentication`].
    #[must_use]
    pub fn app(mut self, factory: impl FnOnce(AuthenticationPipeline) -> Router + Send + 'static) -> Self {
        self.target = Some(Target::App(Box::new(factory)));
        self
    }

    /// Targets an already running endpoint instead of hosting an app.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.target = Some(Target::External(base_url.into()));
        self
    }

    /// Sends diagnostic traces to `sink` instead of `tracing`.
    #[must_use]
    pub fn log_to(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Makes the hosted app see every caller as `identity`.
    #[must_use]
    pub fn override_authentication(mut self, identity: IdentityConfig) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Uses explicit settings instead of loading them from the environment.
    #[must_use]
    pub fn settings(mut self, settings: HarnessSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// JSON format for payloads and rendered bodies.
    #[must_use]
    pub const fn json_format(mut self, format: JsonFormat) -> Self {
        self.json = format;
        self
    }

    /// Starts the app (if any) and builds the executor.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingRequiredArgument`] with neither an app nor a
    ///   base URL (from the builder or `APIPROBE_BASE_URL`)
    /// - [`HarnessError::OverrideRequiresApp`] when overriding authentication
    ///   of an external endpoint
    /// - [`HarnessError::Config`] when settings cannot be loaded
    /// - [`HarnessError::Io`] when the server cannot bind
    pub async fn start(self) -> Result<TestHarness, HarnessError> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => HarnessSettings::load()?,
        };

        let target = self
            .target
            .or_else(|| settings.base_url.clone().map(Target::External))
            .ok_or(DomainError::MissingRequiredArgument("app or base_url"))?;

        let (server, base_url) = match target {
            Target::App(factory) => {
                let mut pipeline = AuthenticationPipeline::new();
                if let Some(identity) = self.identity {
                    pipeline.override_identity(IdentityOverride::new(identity))?;
                }
                let server = AppServer::start(factory(pipeline), settings.bind_addr).await?;
                let base_url = server.base_url();
                (Some(server), base_url)
            }
            Target::External(base_url) => {
                if self.identity.is_some() {
                    return Err(HarnessError::OverrideRequiresApp);
                }
                (None, base_url)
            }
        };

        let transport = ReqwestTransport::with_options(&settings.transport_options())
            .map_err(ApplicationError::from)?;
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(TracingSink::new()) as Arc<dyn DiagnosticSink>);

        let api = RequestExecutor::builder()
            .transport(transport)
            .base_url(base_url)
            .default_headers(self.default_headers)
            .shared_sink(Some(sink))
            .json_format(self.json)
            .build()?;

        Ok(TestHarness { api, server })
    }
}

impl fmt::Debug for HarnessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            Some(Target::App(_)) => "app",
            Some(Target::External(url)) => url.as_str(),
            None => "unset",
        };
        f.debug_struct("HarnessBuilder")
            .field("target", &target)
            .field("default_headers", &self.default_headers)
            .field("identity", &self.identity)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// A started test harness.
///
/// Dropping it disposes the executor and signals the server to stop; call
/// [`TestHarness::shutdown`] to also wait for the server.
#[derive(Debug)]
pub struct TestHarness {
    api: RequestExecutor,
    server: Option<AppServer>,
}

impl TestHarness {
    /// Starts configuring a harness.
    #[must_use]
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    /// The request executor bound to the app.
    #[must_use]
    pub const fn api(&self) -> &RequestExecutor {
        &self.api
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.api.base_url()
    }

    /// Returns true when the app is hosted in-process.
    #[must_use]
    pub const fn is_hosted(&self) -> bool {
        self.server.is_some()
    }

    /// Disposes the executor and stops the in-process server.
    pub async fn shutdown(mut self) {
        self.api.dispose();
        if let Some(server) = self.server.as_mut() {
            server.shutdown().await;
        }
    }
}
