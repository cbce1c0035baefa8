//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building requests, inspecting responses
/// or configuring identities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The response status code is outside the 2xx range.
    #[error("status code {status} is not considered as success\nBody: {body}")]
    NonSuccessStatus {
        /// The status code that was received.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// A claim with the reserved subject-identifier type was supplied as an
    /// extra claim.
    #[error(
        "the '{0}' claim is reserved for the user id; set the user id instead of adding the claim"
    )]
    DuplicateReservedClaim(String),

    /// The body looked like JSON but could not be parsed.
    #[error("body looks like JSON but could not be parsed: {message}")]
    MalformedJsonBody {
        /// The parser error.
        message: String,
        /// The raw body that failed to parse.
        body: String,
    },

    /// A required collaborator or value was not provided.
    #[error("missing required argument: {0}")]
    MissingRequiredArgument(&'static str),

    /// The provided URL is invalid or cannot be resolved.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name is invalid.
    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
