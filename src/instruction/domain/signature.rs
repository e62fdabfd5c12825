//! Canonical serialization and digest computation for instruction signing.
//!
//! Signer and verifier share one function so their view of the canonical
//! form can never drift. The canonical form is compact JSON with a fixed
//! field order; object maps inside `parameters` serialize with sorted keys
//! (the default `serde_json` map is ordered), so the bytes are fully
//! deterministic for a given instruction body.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::rotation::domain::AgentId;

use super::{Instruction, InstructionContext, InstructionId, Operation};
use crate::instruction::error::ProtocolError;

/// The instruction body with the `signature` field excluded, in the exact
/// field order the digest is computed over.
#[derive(Serialize)]
struct SignaturePayload<'a> {
    instruction_id: InstructionId,
    version: u32,
    issuing_agent: AgentId,
    timestamp: &'a DateTime<Utc>,
    operation: &'a Operation,
    context: &'a InstructionContext,
}

/// Computes the hex-encoded SHA-256 signature for an instruction body.
///
/// # Errors
///
/// Returns [`ProtocolError::Canonicalization`] when the body cannot be
/// serialized, which only happens for pathological parameter values.
pub(crate) fn compute_signature(
    instruction_id: InstructionId,
    version: u32,
    issuing_agent: AgentId,
    timestamp: &DateTime<Utc>,
    operation: &Operation,
    context: &InstructionContext,
) -> Result<String, ProtocolError> {
    let payload = SignaturePayload {
        instruction_id,
        version,
        issuing_agent,
        timestamp,
        operation,
        context,
    };
    let bytes = serde_json::to_vec(&payload)
        .map_err(|err| ProtocolError::Canonicalization(err.to_string()))?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Recomputes the signature an instruction's body should carry.
///
/// # Errors
///
/// Returns [`ProtocolError::Canonicalization`] when the body cannot be
/// serialized.
pub fn expected_signature(instruction: &Instruction) -> Result<String, ProtocolError> {
    compute_signature(
        instruction.instruction_id(),
        instruction.version(),
        instruction.issuing_agent(),
        &instruction.timestamp(),
        instruction.operation(),
        instruction.context(),
    )
}
