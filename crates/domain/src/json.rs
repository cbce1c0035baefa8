//! JSON shape sniffing and stable formatting.
//!
//! Output format:
//! - configurable indentation (two spaces by default), or compact
//! - object keys keep their source order
//! - non-ASCII characters are written verbatim, only JSON-mandatory escapes are applied

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use crate::error::{DomainError, DomainResult};

/// Serializer configuration owned by whoever renders or sends JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormat {
    indent: Option<usize>,
}

impl JsonFormat {
    /// Indented output with `width` spaces per level.
    #[must_use]
    pub const fn indented(width: usize) -> Self {
        Self {
            indent: Some(width),
        }
    }

    /// Single-line output.
    #[must_use]
    pub const fn compact() -> Self {
        Self { indent: None }
    }

    /// Serializes any value with this format.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Serialization`] if the value cannot be represented as JSON.
    pub fn to_string<T: Serialize + ?Sized>(&self, value: &T) -> DomainResult<String> {
        let mut buffer = Vec::new();
        let result = match self.indent {
            Some(width) => {
                let indent = vec![b' '; width];
                let mut serializer =
                    Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
                value.serialize(&mut serializer)
            }
            None => {
                let mut serializer = Serializer::with_formatter(&mut buffer, CompactFormatter);
                value.serialize(&mut serializer)
            }
        };
        result.map_err(|e| DomainError::Serialization(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| DomainError::Serialization(e.to_string()))
    }

    /// Re-serializes `raw` if it looks like JSON, otherwise returns it untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedJsonBody`] when `raw` looks like JSON but
    /// does not parse.
    pub fn reformat(&self, raw: &str) -> DomainResult<String> {
        if !looks_like_json(raw) {
            return Ok(raw.to_string());
        }
        let value: Value = serde_json::from_str(raw).map_err(|e| DomainError::MalformedJsonBody {
            message: e.to_string(),
            body: raw.to_string(),
        })?;
        self.to_string(&value)
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::indented(2)
    }
}

/// Returns true when the first non-whitespace character is `{` or `[`.
///
/// Purely syntactic: trailing content is not inspected.
#[must_use]
pub fn looks_like_json(raw: &str) -> bool {
    matches!(raw.trim_start().chars().next(), Some('{' | '['))
}
