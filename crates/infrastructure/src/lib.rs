//! apiprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the axum adapter that lets a
//! hosted application consult the authentication pipeline.

pub mod adapters;
pub mod auth;
pub mod http;

pub use adapters::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, MemorySink, ReqwestTransport, TRACE_TARGET, TracingSink,
    TransportOptions,
};
pub use auth::{AuthContext, AuthRejection, Authenticated, install};
pub use http::{BodyBuildError, BuiltBody, build_body, collect_headers};
