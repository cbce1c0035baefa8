//! HTTP infrastructure utilities.
//!
//! This module provides:
//! - Body building for JSON, text and single-file multipart uploads
//! - Header map conversion shared by the transport and the auth middleware

mod body_builder;
mod headers;

pub use body_builder::{BodyBuildError, BuiltBody, build_body};
pub use headers::collect_headers;
