//! Error and review-finding types for the instruction protocol.

use crate::rotation::error::RotationError;
use thiserror::Error;

/// Errors that abort instruction creation.
///
/// Rotation failures propagate immediately: without a trustworthy role
/// assignment no instruction may be issued.
#[derive(Debug, Clone, Error)]
pub enum ProtocolError {
    /// Role assignment failed; see [`RotationError`] for retry semantics.
    #[error(transparent)]
    Rotation(#[from] RotationError),

    /// The instruction body could not be canonically serialized for signing.
    #[error("instruction canonicalization failed: {0}")]
    Canonicalization(String),
}

/// A single finding from instruction validation.
///
/// Findings are split by [`ReviewIssue::is_fatal`]: signature and structural
/// problems block execution, advisories do not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewIssue {
    /// The recomputed signature does not match the carried one. The
    /// instruction was tampered with or corrupted and must not be executed.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// The operation kind is not in the known set.
    #[error("unknown operation kind: '{0}'")]
    UnknownOperationKind(String),

    /// The operation action is empty.
    #[error("operation action must not be empty")]
    EmptyAction,

    /// The instruction was issued under an unsupported protocol version.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u32),

    /// The operation kind is recognised but deprecated.
    #[error("deprecated operation kind: '{0}'")]
    DeprecatedOperationKind(String),

    /// The context carries no governance anchor.
    #[error("instruction context is missing a governance anchor")]
    MissingAnchor,
}

impl ReviewIssue {
    /// Returns `true` when the finding blocks execution.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SignatureMismatch
                | Self::UnknownOperationKind(_)
                | Self::EmptyAction
                | Self::UnsupportedVersion(_)
        )
    }
}
