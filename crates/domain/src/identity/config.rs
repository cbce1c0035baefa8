//! Identity override configuration

use super::claim::{Claim, claim_types};
use crate::error::{DomainError, DomainResult};

/// Who the override provider pretends the caller is.
///
/// Built once through [`IdentityConfig::builder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    user_id: String,
    simulate_anonymous: bool,
    extra_claims: Vec<Claim>,
}

impl IdentityConfig {
    /// Starts a configuration.
    #[must_use]
    pub fn builder() -> IdentityConfigBuilder {
        IdentityConfigBuilder::default()
    }

    /// Identity that always fails authentication.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            simulate_anonymous: true,
            extra_claims: Vec::new(),
        }
    }

    /// The subject identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Whether authentication should fail as for an anonymous caller.
    #[must_use]
    pub const fn simulate_anonymous(&self) -> bool {
        self.simulate_anonymous
    }

    /// Extra claims in configuration order.
    #[must_use]
    pub fn extra_claims(&self) -> &[Claim] {
        &self.extra_claims
    }

    /// The full claim set: `sub = user_id` followed by the extra claims.
    #[must_use]
    pub fn claims(&self) -> Vec<Claim> {
        let mut claims = Vec::with_capacity(self.extra_claims.len() + 1);
        claims.push(Claim::new(claim_types::SUBJECT, self.user_id.clone()));
        claims.extend(self.extra_claims.iter().cloned());
        claims
    }
}

/// Builder for [`IdentityConfig`].
#[derive(Debug, Default)]
pub struct IdentityConfigBuilder {
    user_id: Option<String>,
    simulate_anonymous: bool,
    extra_claims: Vec<Claim>,
}

impl IdentityConfigBuilder {
    /// Sets the subject identifier.
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Makes every authentication attempt fail.
    #[must_use]
    pub const fn simulate_anonymous(mut self, simulate: bool) -> Self {
        self.simulate_anonymous = simulate;
        self
    }

    /// Adds one extra claim.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateReservedClaim`] for the `sub` claim type;
    /// change the user id instead.
    pub fn add_claim(mut self, claim: impl Into<Claim>) -> DomainResult<Self> {
        let claim = claim.into();
        if claim.is_subject() {
            return Err(DomainError::DuplicateReservedClaim(claim.claim_type));
        }
        self.extra_claims.push(claim);
        Ok(self)
    }

    /// Adds several extra claims, stopping at the first reserved one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateReservedClaim`] if any claim uses the
    /// `sub` type.
    pub fn add_claims<I, C>(self, claims: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Claim>,
    {
        claims
            .into_iter()
            .try_fold(self, |builder, claim| builder.add_claim(claim))
    }

    /// Finishes the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingRequiredArgument`] when no non-blank user
    /// id was set.
    pub fn build(self) -> DomainResult<IdentityConfig> {
        let user_id = self
            .user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(DomainError::MissingRequiredArgument("user_id"))?;
        Ok(IdentityConfig {
            user_id,
            simulate_anonymous: self.simulate_anonymous,
            extra_claims: self.extra_claims,
        })
    }
}
