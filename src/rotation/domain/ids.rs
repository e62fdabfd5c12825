//! Validated identifier types shared across the orchestration protocol.
//!
//! Unit, phase, and anchor identifiers originate in the project-tracking
//! system, so they are validated string newtypes rather than UUIDs minted
//! here.

use super::RotationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a discrete unit of work (one project step).
///
/// # Examples
///
/// ```
/// use tandem::rotation::domain::UnitId;
///
/// let unit = UnitId::new("OF-8.8.1").expect("valid unit id");
/// assert_eq!(unit.as_str(), "OF-8.8.1");
/// assert!(UnitId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Creates a validated unit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::InvalidUnitId`] when the value is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RotationDomainError::InvalidUnitId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for the project phase a unit of work belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseId(String);

impl PhaseId {
    /// Creates a validated phase identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::InvalidPhaseId`] when the value is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RotationDomainError::InvalidPhaseId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PhaseId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier anchoring a unit of work to its governance log entry.
///
/// Anchors are optional in instruction context; their absence is surfaced as
/// a validation warning rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    /// Creates a validated anchor identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::InvalidAnchorId`] when the value is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, RotationDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RotationDomainError::InvalidAnchorId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AnchorId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
