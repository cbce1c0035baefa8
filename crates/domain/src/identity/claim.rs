//! Claims carried by an authenticated subject

use serde::{Deserialize, Serialize};

/// Well-known claim types.
pub mod claim_types {
    /// Subject identifier. Reserved: it always carries the configured user id.
    pub const SUBJECT: &str = "sub";
    /// Display name.
    pub const NAME: &str = "name";
    /// E-mail address.
    pub const EMAIL: &str = "email";
    /// Role membership; may appear several times.
    pub const ROLE: &str = "role";
}

/// A single `type = value` statement about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, e.g. `role`
    #[serde(rename = "type")]
    pub claim_type: String,
    /// Claim value, e.g. `admin`
    pub value: String,
}

impl Claim {
    /// Creates a claim.
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Returns true for the reserved subject-identifier type.
    #[must_use]
    pub fn is_subject(&self) -> bool {
        self.claim_type == claim_types::SUBJECT
    }
}

impl<T: Into<String>, V: Into<String>> From<(T, V)> for Claim {
    fn from((claim_type, value): (T, V)) -> Self {
        Self::new(claim_type, value)
    }
}
