//! End-to-end dispatch pipeline.
//!
//! One call takes a unit of work from role assignment through instruction
//! signing, audit recording, and compliance evaluation. An error-severity
//! violation blocks dispatch; a warnings-only verdict dispatches with the
//! report attached. Any non-compliant verdict leaves a governance warning
//! in the audit trail.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::compliance::{
    domain::ComplianceReport,
    error::ArtifactError,
    ports::{ArtifactSink, ReferenceLookup},
    services::ComplianceValidator,
};
use crate::instruction::{
    domain::{Instruction, Operation},
    error::{ProtocolError, ReviewIssue},
    services::{ContextSeed, InstructionProtocol, review_instruction},
};
use crate::rotation::{domain::TaskRole, ports::RotationStateStore};

/// Errors that abort a dispatch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Instruction creation failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An audit artifact could not be written.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// The freshly signed instruction failed its own structural review.
    #[error("instruction failed structural review: {0:?}")]
    InvalidInstruction(Vec<ReviewIssue>),

    /// The instruction is blocked by error-severity compliance violations.
    /// The boxed report names every violation and its remediation.
    #[error("unit {} blocked by {} compliance error(s)", .0.unit_id, .0.errors)]
    ComplianceBlocked(Box<ComplianceReport>),
}

/// A dispatched instruction together with its compliance verdict.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    instruction: Instruction,
    report: ComplianceReport,
}

impl DispatchOutcome {
    /// The signed instruction that was dispatched.
    #[must_use]
    pub const fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    /// The compliance report the dispatch was cleared under.
    #[must_use]
    pub const fn report(&self) -> &ComplianceReport {
        &self.report
    }

    /// Returns `true` when the dispatch proceeded with warnings attached.
    #[must_use]
    pub const fn has_warnings(&self) -> bool {
        self.report.warnings > 0
    }
}

/// Orchestrates assignment, signing, auditing, and validation per unit.
pub struct TaskPipeline<S, R, A, C>
where
    S: RotationStateStore,
    R: ReferenceLookup,
    A: ArtifactSink,
    C: Clock + Send + Sync,
{
    protocol: InstructionProtocol<S, C>,
    validator: ComplianceValidator<R, A, C>,
    artifacts: Arc<A>,
}

impl<S, R, A, C> TaskPipeline<S, R, A, C>
where
    S: RotationStateStore,
    R: ReferenceLookup,
    A: ArtifactSink,
    C: Clock + Send + Sync,
{
    /// Creates a pipeline from its collaborating services.
    #[must_use]
    pub const fn new(
        protocol: InstructionProtocol<S, C>,
        validator: ComplianceValidator<R, A, C>,
        artifacts: Arc<A>,
    ) -> Self {
        Self {
            protocol,
            validator,
            artifacts,
        }
    }

    /// Runs one unit of work through the full dispatch sequence.
    ///
    /// The instruction artifact is recorded before evaluation, so a blocked
    /// unit still leaves its instruction and report in the audit trail.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ComplianceBlocked`] for error-severity
    /// violations, [`PipelineError::InvalidInstruction`] when the signed
    /// instruction fails structural review, and propagates protocol and
    /// artifact failures.
    pub async fn dispatch(
        &self,
        operation: Operation,
        seed: ContextSeed,
    ) -> Result<DispatchOutcome, PipelineError> {
        let instruction = self.protocol.create_instruction(operation, seed).await?;
        self.artifacts.record_instruction(&instruction).await?;

        let review = review_instruction(&instruction);
        if !review.is_valid() {
            return Err(PipelineError::InvalidInstruction(review.errors().to_vec()));
        }

        let report = self.validator.evaluate(&instruction, TaskRole::Coder).await;
        self.validator.record_verdict(&report).await?;

        if report.allows_dispatch() {
            tracing::info!(
                unit_id = %report.unit_id,
                agent = %report.agent,
                warnings = report.warnings,
                "unit dispatched"
            );
            Ok(DispatchOutcome {
                instruction,
                report,
            })
        } else {
            tracing::warn!(
                unit_id = %report.unit_id,
                errors = report.errors,
                "dispatch blocked by compliance violations"
            );
            Err(PipelineError::ComplianceBlocked(Box::new(report)))
        }
    }
}
