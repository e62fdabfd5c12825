//! Orchestration services for the instruction protocol.

mod protocol;

pub use protocol::{ContextSeed, InstructionProtocol, InstructionReview, review_instruction};
