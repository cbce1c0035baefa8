//! HTTP response domain types

mod outcome;
mod raw;
mod status;

pub use outcome::AssertableResponse;
pub use raw::RawResponse;
pub use status::StatusCode;
