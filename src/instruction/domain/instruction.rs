//! The signed instruction: a self-describing, tamper-evident unit of
//! dispatchable work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::rotation::domain::{AgentId, AnchorId, PhaseId, RoleAssignment, UnitId};

use super::Operation;

/// Protocol schema version stamped into every instruction.
pub const PROTOCOL_VERSION: u32 = 1;

/// Unique identifier for an instruction.
///
/// # Examples
///
/// ```
/// use tandem::instruction::domain::InstructionId;
///
/// let id = InstructionId::new();
/// assert!(!id.as_ref().is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionId(Uuid);

impl InstructionId {
    /// Creates a new random instruction identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an instruction identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for InstructionId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for InstructionId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an instruction sits in the project hierarchy, plus its role split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionContext {
    unit_id: UnitId,
    phase_id: PhaseId,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor_id: Option<AnchorId>,
    role_assignment: RoleAssignment,
}

impl InstructionContext {
    /// Creates an instruction context.
    #[must_use]
    pub const fn new(
        unit_id: UnitId,
        phase_id: PhaseId,
        anchor_id: Option<AnchorId>,
        role_assignment: RoleAssignment,
    ) -> Self {
        Self {
            unit_id,
            phase_id,
            anchor_id,
            role_assignment,
        }
    }

    /// The unit of work this instruction covers.
    #[must_use]
    pub const fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// The project phase the unit belongs to.
    #[must_use]
    pub const fn phase_id(&self) -> &PhaseId {
        &self.phase_id
    }

    /// The governance anchor, when one was recorded.
    #[must_use]
    pub const fn anchor_id(&self) -> Option<&AnchorId> {
        self.anchor_id.as_ref()
    }

    /// The coder/tester split for this unit.
    #[must_use]
    pub const fn role_assignment(&self) -> &RoleAssignment {
        &self.role_assignment
    }
}

/// A signed, structured description of a unit of work.
///
/// Instructions are immutable after signing: a corrected instruction is a
/// new instruction with a new id. The signature covers every other field,
/// so any post-creation edit is detectable by recomputing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    instruction_id: InstructionId,
    version: u32,
    issuing_agent: AgentId,
    timestamp: DateTime<Utc>,
    operation: Operation,
    context: InstructionContext,
    signature: String,
}

impl Instruction {
    /// Assembles a signed instruction from its parts.
    ///
    /// Callers outside the protocol service should not need this; it exists
    /// so the signer can construct the value it just computed a digest for.
    #[must_use]
    pub(crate) fn from_signed_parts(parts: InstructionParts, signature: String) -> Self {
        Self {
            instruction_id: parts.instruction_id,
            version: parts.version,
            issuing_agent: parts.issuing_agent,
            timestamp: parts.timestamp,
            operation: parts.operation,
            context: parts.context,
            signature,
        }
    }

    /// The unique instruction identifier.
    #[must_use]
    pub const fn instruction_id(&self) -> InstructionId {
        self.instruction_id
    }

    /// The protocol schema version the instruction was issued under.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// The agent that issued the instruction (the assigned coder).
    #[must_use]
    pub const fn issuing_agent(&self) -> AgentId {
        self.issuing_agent
    }

    /// Capture-time timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The operation to perform.
    #[must_use]
    pub const fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Project context and role assignment.
    #[must_use]
    pub const fn context(&self) -> &InstructionContext {
        &self.context
    }

    /// The hex-encoded SHA-256 signature over the canonical serialization.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The free text the compliance validator matches rules against: the
    /// operation action plus its serialized parameters.
    #[must_use]
    pub fn task_text(&self) -> String {
        format!("{} {}", self.operation.action(), self.operation.parameters())
    }
}

/// Unsigned instruction fields, grouped for signing.
#[derive(Debug, Clone)]
pub(crate) struct InstructionParts {
    pub instruction_id: InstructionId,
    pub version: u32,
    pub issuing_agent: AgentId,
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub context: InstructionContext,
}
