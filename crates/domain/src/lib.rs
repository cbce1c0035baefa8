//! apiprobe Domain - Core types of the HTTP test harness
//!
//! Requests, captured responses, JSON rendering, identities and diagnostic
//! traces. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod identity;
pub mod json;
pub mod request;
pub mod response;
pub mod trace;

pub use error::{DomainError, DomainResult};
pub use identity::{AuthOutcome, Claim, IdentityConfig, IdentityConfigBuilder, Subject, claim_types};
pub use json::{JsonFormat, looks_like_json};
pub use request::{Header, Headers, HttpMethod, MultipartFile, RequestBody, RequestSpec};
pub use response::{AssertableResponse, RawResponse, StatusCode};
pub use trace::DiagnosticTrace;
