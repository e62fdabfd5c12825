//! Audit artifact sink port.
//!
//! One artifact per generated instruction and one per compliance
//! evaluation, keyed by unit of work. Artifacts are consumed by external
//! reporting and operators; this subsystem never re-parses them.

use async_trait::async_trait;

use crate::compliance::{domain::ComplianceReport, error::ArtifactError};
use crate::instruction::domain::Instruction;
use crate::rotation::domain::UnitId;

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Writes structured audit records for instructions and verdicts.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Records a generated instruction.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::WriteFailed`] when persistence fails.
    async fn record_instruction(&self, instruction: &Instruction) -> ArtifactResult<()>;

    /// Records a compliance evaluation verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::WriteFailed`] when persistence fails.
    async fn record_report(&self, report: &ComplianceReport) -> ArtifactResult<()>;

    /// Records the rendered governance warning for a non-compliant unit.
    ///
    /// This is the only point at which a non-compliant result becomes
    /// externally visible as an actionable item.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::WriteFailed`] when persistence fails.
    async fn record_governance_warning(
        &self,
        unit_id: &UnitId,
        markdown: &str,
    ) -> ArtifactResult<()>;
}
