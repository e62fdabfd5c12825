//! Error types for compliance configuration and side effects.

use std::sync::Arc;
use thiserror::Error;

/// Rule-set configuration failures.
///
/// These fail fast at startup; a running validator never produces them per
/// instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A rule pattern failed to compile.
    #[error("rule {rule_id}: pattern '{pattern}' failed to compile: {reason}")]
    InvalidPattern {
        /// The rule carrying the pattern.
        rule_id: String,
        /// The offending pattern text.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A rule id is empty or whitespace-only.
    #[error("rule id must not be empty")]
    EmptyRuleId,

    /// Two rules share an id.
    #[error("duplicate rule id: {0}")]
    DuplicateRuleId(String),

    /// The rule-set JSON is malformed.
    #[error("rule set failed to parse: {0}")]
    Parse(String),
}

/// Failures resolving an agent's onboarding reference.
///
/// The validator converts these into error-severity violations rather than
/// propagating them, so a broken reference store degrades to flag-and-report.
#[derive(Debug, Clone, Error)]
#[error("reference lookup failed: {0}")]
pub struct ReferenceError(pub Arc<dyn std::error::Error + Send + Sync>);

impl ReferenceError {
    /// Wraps a lookup failure cause.
    #[must_use]
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Failures writing audit artifacts.
#[derive(Debug, Clone, Error)]
pub enum ArtifactError {
    /// The artifact could not be written.
    #[error("artifact write failed: {0}")]
    WriteFailed(Arc<dyn std::error::Error + Send + Sync>),

    /// The governance warning could not be rendered.
    #[error("governance warning rendering failed: {0}")]
    Render(String),
}

impl ArtifactError {
    /// Wraps a write failure cause.
    #[must_use]
    pub fn write_failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::WriteFailed(Arc::new(err))
    }
}
