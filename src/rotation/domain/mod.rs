//! Domain types for the role rotation state machine.

mod agent;
mod assignment;
mod error;
mod ids;

pub use agent::{AgentId, ParseAgentIdError, ParseTaskRoleError, TaskRole};
pub use assignment::{RoleAssignment, RotationState};
pub use error::RotationDomainError;
pub use ids::{AnchorId, PhaseId, UnitId};
