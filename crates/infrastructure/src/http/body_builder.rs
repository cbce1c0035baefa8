//! HTTP request body builder.
//!
//! Turns the domain `RequestBody` into something reqwest can send.

use apiprobe_domain::{MultipartFile, RequestBody};
use reqwest::multipart::{Form, Part};

/// Error type for body building operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BodyBuildError {
    /// The guessed MIME type for a file part was rejected.
    #[error("Invalid MIME type for {file_name}: {message}")]
    InvalidMime {
        /// File the part was built for.
        file_name: String,
        /// Underlying error message.
        message: String,
    },
}

/// Result of building a body.
#[derive(Debug)]
pub enum BuiltBody {
    /// No body.
    None,
    /// Text/JSON body with content type.
    Text {
        /// Body text.
        content: String,
        /// Content type implied by the body.
        content_type: String,
    },
    /// Multipart form data.
    Multipart(Form),
}

impl BuiltBody {
    /// Get the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Text { content_type, .. } => Some(content_type),
            Self::None | Self::Multipart(_) => None, // reqwest sets this automatically with boundary
        }
    }

    /// Check if this is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Check if this body is empty/none.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Build an HTTP body from a domain body.
///
/// # Errors
///
/// Returns [`BodyBuildError::InvalidMime`] if a file part's MIME type is rejected.
pub fn build_body(body: &RequestBody) -> Result<BuiltBody, BodyBuildError> {
    match body {
        RequestBody::Empty => Ok(BuiltBody::None),
        RequestBody::Json(content) => Ok(BuiltBody::Text {
            content: content.clone(),
            content_type: apiprobe_domain::request::JSON_CONTENT_TYPE.to_string(),
        }),
        RequestBody::Text {
            content,
            content_type,
        } => Ok(BuiltBody::Text {
            content: content.clone(),
            content_type: content_type.clone(),
        }),
        RequestBody::Multipart(file) => Ok(BuiltBody::Multipart(build_multipart_form(file)?)),
    }
}

fn build_multipart_form(file: &MultipartFile) -> Result<Form, BodyBuildError> {
    let mime_type = mime_guess::from_path(&file.file_name)
        .first_or_octet_stream()
        .to_string();

    let part = Part::bytes(file.content.clone())
        .file_name(file.file_name.clone())
        .mime_str(&mime_type)
        .map_err(|e| BodyBuildError::InvalidMime {
            file_name: file.file_name.clone(),
            message: e.to_string(),
        })?;

    Ok(Form::new().part(file.field_name.clone(), part))
}
