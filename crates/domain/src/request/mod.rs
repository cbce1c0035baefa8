//! HTTP request domain types

mod body;
mod header;
mod method;
mod spec;

pub use body::{JSON_CONTENT_TYPE, MULTIPART_FILE_FIELD, MultipartFile, RequestBody};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use spec::{RequestSpec, resolve_url};
