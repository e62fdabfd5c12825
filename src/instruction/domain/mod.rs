//! Domain types for the instruction protocol.

mod instruction;
mod operation;
mod signature;

pub(crate) use instruction::InstructionParts;
pub use instruction::{Instruction, InstructionContext, InstructionId, PROTOCOL_VERSION};
pub use operation::{DEPRECATED_OPERATION_KINDS, KNOWN_OPERATION_KINDS, Operation};
pub(crate) use signature::compute_signature;
pub use signature::expected_signature;
