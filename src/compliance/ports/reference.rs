//! Reference material lookup port.
//!
//! The validator depends on an external collaborator that resolves an agent
//! identity to its onboarding/reference document. Absence of that document
//! is a rule violation, not an exception.

use async_trait::async_trait;

use crate::compliance::error::ReferenceError;
use crate::rotation::domain::AgentId;

/// A resolved onboarding document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingReference {
    /// The agent the document belongs to.
    pub agent: AgentId,
    /// Where the document lives (path, URL, or record key).
    pub location: String,
}

impl OnboardingReference {
    /// Creates a resolved reference.
    #[must_use]
    pub fn new(agent: AgentId, location: impl Into<String>) -> Self {
        Self {
            agent,
            location: location.into(),
        }
    }
}

/// Resolves agent identities to onboarding reference material.
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    /// Looks up the onboarding document for an agent.
    ///
    /// Returns `Ok(None)` when no document exists for the agent.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the lookup itself fails (store
    /// unreachable, unreadable index). The validator treats this the same
    /// as a missing document: an error-severity violation.
    async fn onboarding_reference(
        &self,
        agent: AgentId,
    ) -> Result<Option<OnboardingReference>, ReferenceError>;
}
