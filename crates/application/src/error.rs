//! Application error types

use apiprobe_domain::DomainError;
use thiserror::Error;

use crate::ports::TransportError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain error occurred (non-success status, malformed body, invalid
    /// configuration).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The transport failed before a response was read.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] TransportError),

    /// A file needed for the request could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// The executor was used after `dispose`.
    #[error("request executor has been disposed")]
    Disposed,

    /// An authentication override was installed twice on the same pipeline.
    #[error("an authentication override is already installed")]
    OverrideAlreadyInstalled,
}

impl ApplicationError {
    /// The status code when this is a non-success status failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Domain(DomainError::NonSuccessStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
