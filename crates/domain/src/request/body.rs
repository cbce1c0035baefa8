//! Request body types

/// Content type used for JSON payloads.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Form field name used by single-file multipart uploads.
pub const MULTIPART_FILE_FIELD: &str = "files";

/// A file attached to a multipart upload, fully buffered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    /// Form field name.
    pub field_name: String,
    /// File name reported to the server.
    pub file_name: String,
    /// File content.
    pub content: Vec<u8>,
}

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Serialized JSON text.
    Json(String),
    /// Arbitrary text with its content type.
    Text {
        /// Body text.
        content: String,
        /// Content-Type header value.
        content_type: String,
    },
    /// `multipart/form-data` with a single file part.
    Multipart(MultipartFile),
}

impl RequestBody {
    /// Creates a JSON body from already serialized text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json(content.into())
    }

    /// Creates a text body with an explicit content type.
    #[must_use]
    pub fn text(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Creates a multipart upload for `file_name` using the fixed field name.
    #[must_use]
    pub fn file(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self::Multipart(MultipartFile {
            field_name: MULTIPART_FILE_FIELD.to_string(),
            file_name: file_name.into(),
            content,
        })
    }

    /// Returns true when there is nothing to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the content type the body implies.
    ///
    /// Multipart bodies return `None` because the boundary is chosen by the
    /// transport.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::Text { content_type, .. } => Some(content_type),
            Self::Empty | Self::Multipart(_) => None,
        }
    }

    /// Short human-readable summary used in diagnostic traces.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Json(content) | Self::Text { content, .. } => content.clone(),
            Self::Multipart(file) => format!(
                "multipart/form-data; {}=\"{}\" ({} bytes)",
                file.field_name,
                file.file_name,
                file.content.len()
            ),
        }
    }
}
