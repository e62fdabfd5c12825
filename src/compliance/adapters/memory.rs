//! In-memory adapters for compliance ports, used in tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::compliance::{
    domain::ComplianceReport,
    error::{ArtifactError, ReferenceError},
    ports::{ArtifactResult, ArtifactSink, OnboardingReference, ReferenceLookup},
};
use crate::instruction::domain::Instruction;
use crate::rotation::domain::{AgentId, UnitId};

/// In-memory onboarding reference library.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceLibrary {
    documents: Arc<RwLock<HashMap<AgentId, String>>>,
}

impl InMemoryReferenceLibrary {
    /// Creates an empty library with no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library with onboarding documents for both agents.
    #[must_use]
    pub fn with_both_agents() -> Self {
        let library = Self::new();
        library.insert(AgentId::Claude, "memory://claude-onboarding.md");
        library.insert(AgentId::Gizmo, "memory://gizmo-onboarding.md");
        library
    }

    /// Registers an onboarding document for an agent.
    pub fn insert(&self, agent: AgentId, location: impl Into<String>) {
        if let Ok(mut documents) = self.documents.write() {
            documents.insert(agent, location.into());
        }
    }

    /// Removes an agent's onboarding document.
    pub fn remove(&self, agent: AgentId) {
        if let Ok(mut documents) = self.documents.write() {
            documents.remove(&agent);
        }
    }
}

#[async_trait]
impl ReferenceLookup for InMemoryReferenceLibrary {
    async fn onboarding_reference(
        &self,
        agent: AgentId,
    ) -> Result<Option<OnboardingReference>, ReferenceError> {
        let documents = self
            .documents
            .read()
            .map_err(|err| ReferenceError::new(std::io::Error::other(err.to_string())))?;
        Ok(documents
            .get(&agent)
            .map(|location| OnboardingReference::new(agent, location.clone())))
    }
}

#[derive(Debug, Default)]
struct RecordedArtifacts {
    instructions: Vec<Instruction>,
    reports: Vec<ComplianceReport>,
    governance_warnings: Vec<(UnitId, String)>,
}

/// In-memory artifact sink capturing everything written through it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactSink {
    recorded: Arc<RwLock<RecordedArtifacts>>,
}

impl InMemoryArtifactSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions recorded so far, in write order.
    #[must_use]
    pub fn instructions(&self) -> Vec<Instruction> {
        self.recorded
            .read()
            .map(|recorded| recorded.instructions.clone())
            .unwrap_or_default()
    }

    /// Reports recorded so far, in write order.
    #[must_use]
    pub fn reports(&self) -> Vec<ComplianceReport> {
        self.recorded
            .read()
            .map(|recorded| recorded.reports.clone())
            .unwrap_or_default()
    }

    /// Governance warnings recorded so far, in write order.
    #[must_use]
    pub fn governance_warnings(&self) -> Vec<(UnitId, String)> {
        self.recorded
            .read()
            .map(|recorded| recorded.governance_warnings.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ArtifactSink for InMemoryArtifactSink {
    async fn record_instruction(&self, instruction: &Instruction) -> ArtifactResult<()> {
        let mut recorded = self
            .recorded
            .write()
            .map_err(|err| ArtifactError::write_failed(std::io::Error::other(err.to_string())))?;
        recorded.instructions.push(instruction.clone());
        Ok(())
    }

    async fn record_report(&self, report: &ComplianceReport) -> ArtifactResult<()> {
        let mut recorded = self
            .recorded
            .write()
            .map_err(|err| ArtifactError::write_failed(std::io::Error::other(err.to_string())))?;
        recorded.reports.push(report.clone());
        Ok(())
    }

    async fn record_governance_warning(
        &self,
        unit_id: &UnitId,
        markdown: &str,
    ) -> ArtifactResult<()> {
        let mut recorded = self
            .recorded
            .write()
            .map_err(|err| ArtifactError::write_failed(std::io::Error::other(err.to_string())))?;
        recorded
            .governance_warnings
            .push((unit_id.clone(), markdown.to_owned()));
        Ok(())
    }
}
