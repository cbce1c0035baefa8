//! apiprobe - HTTP test harness
//!
//! Hosts an axum application in-process (or targets a running endpoint),
//! optionally overrides who the application thinks the caller is, and sends
//! requests whose responses are traced and asserted.
//!
//! ```no_run
//! use apiprobe::{CallOptions, IdentityConfig, TestHarness, install_authentication};
//! use axum::{Router, routing::get};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let harness = TestHarness::builder()
//!     .app(|pipeline| {
//!         install_authentication(Router::new().route("/health", get(|| async { "ok" })), pipeline)
//!     })
//!     .override_authentication(IdentityConfig::builder().user_id("u1").build()?)
//!     .start()
//!     .await?;
//!
//! let response = harness.api().get("/health", CallOptions::new()).await?;
//! assert_eq!(response.body(), "ok");
//! harness.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod harness;
pub mod logging;
pub mod server;

pub use config::HarnessSettings;
pub use harness::{HarnessBuilder, HarnessError, TestHarness};
pub use logging::init_test_logging;
pub use server::AppServer;

pub use apiprobe_application::ports::{AuthenticationRequest, AuthenticationScheme, DiagnosticSink};
pub use apiprobe_application::{
    ApplicationError, AuthenticationPipeline, CallOptions, IdentityOverride, RequestExecutor,
};
pub use apiprobe_domain::{
    AssertableResponse, AuthOutcome, Claim, DomainError, Header, Headers, HttpMethod,
    IdentityConfig, JsonFormat, RequestBody, RequestSpec, Subject, claim_types,
};
pub use apiprobe_infrastructure::{
    Authenticated, MemorySink, TracingSink, install as install_authentication,
};
