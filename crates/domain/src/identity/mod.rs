//! Identity types used by the authentication override

mod claim;
mod config;
mod outcome;

pub use claim::{Claim, claim_types};
pub use config::{IdentityConfig, IdentityConfigBuilder};
pub use outcome::{AuthOutcome, Subject};
