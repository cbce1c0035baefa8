//! Authentication override and the pipeline it plugs into.

mod identity_override;
mod pipeline;

pub use identity_override::{IdentityOverride, OVERRIDE_SCHEME};
pub use pipeline::AuthenticationPipeline;
