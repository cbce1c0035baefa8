//! Result of an authentication decision

use serde::{Deserialize, Serialize};

use super::claim::{Claim, claim_types};

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Name of the scheme that authenticated the caller.
    pub scheme: String,
    /// Claims in the order the scheme produced them.
    pub claims: Vec<Claim>,
}

impl Subject {
    /// Creates a subject.
    #[must_use]
    pub fn new(scheme: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            scheme: scheme.into(),
            claims,
        }
    }

    /// The subject identifier (`sub` claim), if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.claim(claim_types::SUBJECT)
    }

    /// First value of `claim_type`.
    #[must_use]
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Every value of `claim_type`.
    pub fn claims_of<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.claims
            .iter()
            .filter(move |c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Returns true if the subject has exactly this claim.
    #[must_use]
    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && c.value == value)
    }
}

/// The two terminal outcomes of an authentication decision.
///
/// `Failure` is a protocol-level "not authenticated" result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The caller was authenticated.
    Success(Subject),
    /// The caller is not authenticated.
    Failure {
        /// Why authentication failed.
        reason: String,
    },
}

impl AuthOutcome {
    /// Creates a failure.
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// The subject on success.
    #[must_use]
    pub const fn subject(&self) -> Option<&Subject> {
        match self {
            Self::Success(subject) => Some(subject),
            Self::Failure { .. } => None,
        }
    }

    /// Returns true on success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
