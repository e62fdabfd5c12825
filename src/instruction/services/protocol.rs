//! Instruction protocol service: builds, signs, and reviews instructions.

use std::sync::Arc;

use mockable::Clock;

use crate::instruction::{
    domain::{
        Instruction, InstructionContext, InstructionId, InstructionParts, Operation,
        PROTOCOL_VERSION, compute_signature, expected_signature,
    },
    error::{ProtocolError, ReviewIssue},
};
use crate::rotation::{
    domain::{AnchorId, PhaseId, UnitId},
    ports::RotationStateStore,
    services::RotationService,
};

/// Project coordinates supplied by the caller when requesting an instruction.
///
/// The role assignment is not part of the seed; the protocol populates it by
/// consulting the rotation service.
#[derive(Debug, Clone)]
pub struct ContextSeed {
    /// The unit of work the instruction covers.
    pub unit_id: UnitId,
    /// The project phase the unit belongs to.
    pub phase_id: PhaseId,
    /// Optional governance anchor; its absence is a validation warning.
    pub anchor_id: Option<AnchorId>,
}

impl ContextSeed {
    /// Creates a context seed without a governance anchor.
    #[must_use]
    pub const fn new(unit_id: UnitId, phase_id: PhaseId) -> Self {
        Self {
            unit_id,
            phase_id,
            anchor_id: None,
        }
    }

    /// Attaches a governance anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor_id: AnchorId) -> Self {
        self.anchor_id = Some(anchor_id);
        self
    }
}

/// Outcome of reviewing a received instruction.
#[derive(Debug, Clone, Default)]
pub struct InstructionReview {
    errors: Vec<ReviewIssue>,
    warnings: Vec<ReviewIssue>,
}

impl InstructionReview {
    /// Returns `true` when no fatal finding was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fatal findings; any one of these forbids execution.
    #[must_use]
    pub fn errors(&self) -> &[ReviewIssue] {
        &self.errors
    }

    /// Non-fatal advisories.
    #[must_use]
    pub fn warnings(&self) -> &[ReviewIssue] {
        &self.warnings
    }

    fn record(&mut self, issue: ReviewIssue) {
        if issue.is_fatal() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }
}

/// Service producing and reviewing tamper-evident instructions.
///
/// Creation consults the rotation service so the instruction embeds the
/// authoritative role assignment for its unit of work; review is stateless.
#[derive(Clone)]
pub struct InstructionProtocol<S, C>
where
    S: RotationStateStore,
    C: Clock + Send + Sync,
{
    rotation: RotationService<S>,
    clock: Arc<C>,
}

impl<S, C> InstructionProtocol<S, C>
where
    S: RotationStateStore,
    C: Clock + Send + Sync,
{
    /// Creates a protocol service.
    #[must_use]
    pub const fn new(rotation: RotationService<S>, clock: Arc<C>) -> Self {
        Self { rotation, clock }
    }

    /// Builds and signs an instruction for a unit of work.
    ///
    /// Assigns roles through the rotation service (idempotent per unit),
    /// stamps a fresh [`InstructionId`] and capture-time timestamp, and
    /// signs the canonical body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Rotation`] when role assignment fails and
    /// [`ProtocolError::Canonicalization`] when the body cannot be signed.
    pub async fn create_instruction(
        &self,
        operation: Operation,
        seed: ContextSeed,
    ) -> Result<Instruction, ProtocolError> {
        let assignment = self.rotation.assign_roles(seed.unit_id.clone()).await?;
        let issuing_agent = assignment.coder();
        let context =
            InstructionContext::new(seed.unit_id, seed.phase_id, seed.anchor_id, assignment);

        let parts = InstructionParts {
            instruction_id: InstructionId::new(),
            version: PROTOCOL_VERSION,
            issuing_agent,
            timestamp: self.clock.utc(),
            operation,
            context,
        };
        let signature = compute_signature(
            parts.instruction_id,
            parts.version,
            parts.issuing_agent,
            &parts.timestamp,
            &parts.operation,
            &parts.context,
        )?;

        let instruction = Instruction::from_signed_parts(parts, signature);
        tracing::info!(
            instruction_id = %instruction.instruction_id(),
            unit_id = %instruction.context().unit_id(),
            issuing_agent = %instruction.issuing_agent(),
            "instruction signed"
        );
        Ok(instruction)
    }

    /// Reviews a received instruction for integrity and structural
    /// completeness. See [`review_instruction`].
    #[must_use]
    pub fn validate_instruction(&self, instruction: &Instruction) -> InstructionReview {
        review_instruction(instruction)
    }
}

/// Reviews a received instruction for integrity and structural completeness.
///
/// A signature mismatch is always a fatal finding: the instruction was
/// tampered with or corrupted in transit and must not be executed. Missing
/// optional context (the governance anchor) and deprecated operation kinds
/// are warnings.
#[must_use]
pub fn review_instruction(instruction: &Instruction) -> InstructionReview {
    let mut review = InstructionReview::default();

    match expected_signature(instruction) {
        Ok(expected) if expected == instruction.signature() => {}
        Ok(_) | Err(_) => review.record(ReviewIssue::SignatureMismatch),
    }

    if instruction.version() != PROTOCOL_VERSION {
        review.record(ReviewIssue::UnsupportedVersion(instruction.version()));
    }

    let operation = instruction.operation();
    if operation.action().trim().is_empty() {
        review.record(ReviewIssue::EmptyAction);
    }
    if operation.has_known_kind() {
        if operation.has_deprecated_kind() {
            review.record(ReviewIssue::DeprecatedOperationKind(
                operation.kind().to_owned(),
            ));
        }
    } else {
        review.record(ReviewIssue::UnknownOperationKind(
            operation.kind().to_owned(),
        ));
    }

    if instruction.context().anchor_id().is_none() {
        review.record(ReviewIssue::MissingAnchor);
    }

    if !review.is_valid() {
        tracing::warn!(
            instruction_id = %instruction.instruction_id(),
            errors = review.errors().len(),
            "instruction failed validation"
        );
    }
    review
}
