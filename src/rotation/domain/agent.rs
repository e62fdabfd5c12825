//! Agent identities and task roles for the dual-agent rotation.
//!
//! The platform operates with exactly two cooperating agents. Every unit of
//! work splits responsibility between them: one codes, the other tests. The
//! two-agent model is a deliberate constraint carried over from the source
//! governance process; there is no third participant and no failover.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two known cooperating agents.
///
/// # Examples
///
/// ```
/// use tandem::rotation::domain::AgentId;
///
/// assert_eq!(AgentId::Claude.other(), AgentId::Gizmo);
/// assert_eq!(AgentId::Gizmo.other(), AgentId::Claude);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    /// The implementation-focused agent.
    Claude,
    /// The architecture and review agent.
    Gizmo,
}

impl AgentId {
    /// Returns the peer agent.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Claude => Self::Gizmo,
            Self::Gizmo => Self::Claude,
        }
    }

    /// Returns the agent identity as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gizmo => "gizmo",
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown agent identity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAgentIdError(String);

impl fmt::Display for ParseAgentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown agent identity: '{}'", self.0)
    }
}

impl std::error::Error for ParseAgentIdError {}

impl TryFrom<&str> for AgentId {
    type Error = ParseAgentIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "claude" => Ok(Self::Claude),
            "gizmo" => Ok(Self::Gizmo),
            _ => Err(ParseAgentIdError(s.to_owned())),
        }
    }
}

/// The responsibility an agent carries for a unit of work.
///
/// Roles are mutually exclusive per unit: the coder implements, the tester
/// verifies. Compliance rules may target one role or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskRole {
    /// Implements the unit of work.
    Coder,
    /// Verifies the unit of work.
    Tester,
}

impl TaskRole {
    /// Returns the role as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coder => "coder",
            Self::Tester => "tester",
        }
    }
}

impl fmt::Display for TaskRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown task role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTaskRoleError(String);

impl fmt::Display for ParseTaskRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task role: '{}'; expected coder or tester", self.0)
    }
}

impl std::error::Error for ParseTaskRoleError {}

impl TryFrom<&str> for TaskRole {
    type Error = ParseTaskRoleError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "coder" => Ok(Self::Coder),
            "tester" => Ok(Self::Tester),
            _ => Err(ParseTaskRoleError(s.to_owned())),
        }
    }
}
