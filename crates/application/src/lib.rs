//! apiprobe Application - Request execution and authentication override
//!
//! This crate defines the application layer with:
//! - Port traits (transport, diagnostic sink, authentication scheme)
//! - The request executor that drives a call end to end
//! - The identity override and the authentication pipeline it plugs into
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod executor;
pub mod ports;

pub use auth::{AuthenticationPipeline, IdentityOverride, OVERRIDE_SCHEME};
pub use error::{ApplicationError, ApplicationResult};
pub use executor::{CallOptions, PreSendHook, RequestExecutor, RequestExecutorBuilder};
pub use ports::{
    AuthenticationRequest, AuthenticationScheme, DiagnosticSink, HttpTransport, TransportError,
    TransportFuture,
};
