//! axum adapter for the authentication pipeline.
//!
//! [`install`] runs the pipeline for each request; [`Authenticated`] lets a
//! handler require a successful outcome.

mod extractor;
mod middleware;

pub use extractor::{AuthRejection, Authenticated};
pub use middleware::{AuthContext, install};

#[cfg(test)]
mod tests;
