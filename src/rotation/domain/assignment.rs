//! Role assignments and the durable rotation state they are computed from.

use serde::{Deserialize, Serialize};

use super::{AgentId, RotationDomainError, TaskRole, UnitId};

/// The coder/tester split computed for one unit of work.
///
/// Once computed, an assignment is immutable: retrying the same unit must
/// return the identical record rather than advancing the rotation.
///
/// # Examples
///
/// ```
/// use tandem::rotation::domain::{AgentId, RoleAssignment, TaskRole, UnitId};
///
/// let unit = UnitId::new("step-1").expect("valid unit id");
/// let assignment = RoleAssignment::new(unit, AgentId::Claude)
///     .expect("distinct roles");
/// assert_eq!(assignment.coder(), AgentId::Claude);
/// assert_eq!(assignment.tester(), AgentId::Gizmo);
/// assert_eq!(assignment.agent_for(TaskRole::Tester), AgentId::Gizmo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoleAssignment")]
pub struct RoleAssignment {
    unit_id: UnitId,
    coder: AgentId,
    tester: AgentId,
}

/// Wire shape of a role assignment, revalidated on deserialization so a
/// hand-edited state file cannot smuggle in overlapping roles.
#[derive(Debug, Deserialize)]
struct RawRoleAssignment {
    unit_id: UnitId,
    coder: AgentId,
    tester: AgentId,
}

impl TryFrom<RawRoleAssignment> for RoleAssignment {
    type Error = RotationDomainError;

    fn try_from(raw: RawRoleAssignment) -> Result<Self, Self::Error> {
        Self::from_parts(raw.unit_id, raw.coder, raw.tester)
    }
}

impl RoleAssignment {
    /// Creates an assignment with the given coder; the tester is always the
    /// peer agent.
    ///
    /// # Errors
    ///
    /// Infallible for the two-agent model, but kept fallible so deserialized
    /// records can be revalidated through [`RoleAssignment::from_parts`].
    pub fn new(unit_id: UnitId, coder: AgentId) -> Result<Self, RotationDomainError> {
        Self::from_parts(unit_id, coder, coder.other())
    }

    /// Reconstructs an assignment from its stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::CoderTesterOverlap`] when both roles
    /// name the same agent. Persisted history is revalidated on load so a
    /// hand-edited state file cannot smuggle in an overlapping assignment.
    pub fn from_parts(
        unit_id: UnitId,
        coder: AgentId,
        tester: AgentId,
    ) -> Result<Self, RotationDomainError> {
        if coder == tester {
            return Err(RotationDomainError::CoderTesterOverlap {
                unit_id,
                agent: coder,
            });
        }
        Ok(Self {
            unit_id,
            coder,
            tester,
        })
    }

    /// The unit of work this assignment covers.
    #[must_use]
    pub const fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// The agent assigned to code.
    #[must_use]
    pub const fn coder(&self) -> AgentId {
        self.coder
    }

    /// The agent assigned to test.
    #[must_use]
    pub const fn tester(&self) -> AgentId {
        self.tester
    }

    /// Returns the agent holding the given role.
    #[must_use]
    pub const fn agent_for(&self, role: TaskRole) -> AgentId {
        match role {
            TaskRole::Coder => self.coder,
            TaskRole::Tester => self.tester,
        }
    }
}

/// Durable rotation record: the current coder pointer plus the append-only
/// per-unit assignment history.
///
/// The history is the idempotency ledger: a unit that already appears in it
/// keeps its recorded assignment forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    current_coder: AgentId,
    history: Vec<RoleAssignment>,
}

impl RotationState {
    /// The coder assigned to the first-ever unit of work.
    pub const INITIAL_CODER: AgentId = AgentId::Claude;

    /// Creates the initial state used when no persisted record exists.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            current_coder: Self::INITIAL_CODER,
            history: Vec::new(),
        }
    }

    /// The agent that will code the next fresh unit of work.
    #[must_use]
    pub const fn current_coder(&self) -> AgentId {
        self.current_coder
    }

    /// Time-ordered assignment history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoleAssignment] {
        &self.history
    }

    /// Looks up the recorded assignment for a unit, if any.
    #[must_use]
    pub fn assignment_for(&self, unit_id: &UnitId) -> Option<&RoleAssignment> {
        self.history
            .iter()
            .find(|entry| entry.unit_id() == unit_id)
    }

    /// Computes the assignment for a fresh unit and advances the rotation.
    ///
    /// Returns the recorded assignment unchanged when the unit already
    /// appears in history, leaving the current-coder pointer untouched. This
    /// is the idempotency contract that prevents role drift under retries.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError`] only when assignment construction
    /// fails, which cannot happen for the two-agent model.
    pub fn assign(&mut self, unit_id: UnitId) -> Result<RoleAssignment, RotationDomainError> {
        if let Some(existing) = self.assignment_for(&unit_id) {
            return Ok(existing.clone());
        }
        let assignment = RoleAssignment::new(unit_id, self.current_coder)?;
        self.current_coder = self.current_coder.other();
        self.history.push(assignment.clone());
        Ok(assignment)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::initial()
    }
}
