//! Operation descriptors carried inside instructions.
//!
//! The operation payload is opaque to the protocol at creation time; its
//! kind is checked against the known set during validation.

use serde::{Deserialize, Serialize};

/// Operation kinds the execution collaborators understand.
pub const KNOWN_OPERATION_KINDS: &[&str] = &[
    "step-execution",
    "data-reconciliation",
    "governance-update",
    "deployment",
    "legacy-sync",
];

/// Operation kinds that are still recognised but scheduled for removal.
/// Using one yields a validation warning, never an error.
pub const DEPRECATED_OPERATION_KINDS: &[&str] = &["legacy-sync"];

/// What an instruction asks an agent to do.
///
/// By convention the free-text task description travels in
/// `parameters.description`; the compliance validator matches its rules
/// against the action plus the serialized parameters.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tandem::instruction::domain::Operation;
///
/// let operation = Operation::new(
///     "step-execution",
///     "implement-step",
///     json!({"description": "Implement per the manual reference"}),
/// );
/// assert!(operation.has_known_kind());
/// assert!(!operation.has_deprecated_kind());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    kind: String,
    action: String,
    parameters: serde_json::Value,
}

impl Operation {
    /// Creates an operation descriptor.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        action: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: kind.into(),
            action: action.into(),
            parameters,
        }
    }

    /// The operation kind, checked against the known set at validation.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The concrete action requested of the agent.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Arbitrary structured parameters for the executor.
    #[must_use]
    pub const fn parameters(&self) -> &serde_json::Value {
        &self.parameters
    }

    /// Returns `true` when the kind is one the executors understand.
    #[must_use]
    pub fn has_known_kind(&self) -> bool {
        KNOWN_OPERATION_KINDS.contains(&self.kind.as_str())
    }

    /// Returns `true` when the kind is recognised but deprecated.
    #[must_use]
    pub fn has_deprecated_kind(&self) -> bool {
        DEPRECATED_OPERATION_KINDS.contains(&self.kind.as_str())
    }
}
