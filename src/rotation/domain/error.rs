//! Domain error types for rotation state and identifiers.

use super::{AgentId, UnitId};
use thiserror::Error;

/// Validation failures for rotation domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationDomainError {
    /// The unit identifier is empty or whitespace-only.
    #[error("invalid unit id: '{0}'")]
    InvalidUnitId(String),

    /// The phase identifier is empty or whitespace-only.
    #[error("invalid phase id: '{0}'")]
    InvalidPhaseId(String),

    /// The anchor identifier is empty or whitespace-only.
    #[error("invalid anchor id: '{0}'")]
    InvalidAnchorId(String),

    /// A stored assignment names the same agent as coder and tester.
    #[error("unit {unit_id}: agent '{agent}' cannot hold both roles")]
    CoderTesterOverlap {
        /// The unit of work carrying the invalid assignment.
        unit_id: UnitId,
        /// The agent named for both roles.
        agent: AgentId,
    },
}
