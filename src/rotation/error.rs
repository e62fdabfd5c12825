//! Service-level error types for role rotation.

use crate::rotation::{
    domain::{RotationDomainError, UnitId},
    ports::RotationStoreError,
};
use thiserror::Error;

/// Errors surfaced by the rotation service.
///
/// A store that cannot be reached is always reported; the service never
/// silently falls back to a fixed role, since that would break the
/// alternation guarantee.
#[derive(Debug, Clone, Error)]
pub enum RotationError {
    /// The durable rotation store could not be read. The caller should
    /// retry; the rotation has not advanced.
    #[error("rotation state unavailable: {0}")]
    StateUnavailable(#[source] RotationStoreError),

    /// The advanced rotation state could not be persisted. The caller should
    /// retry with the same unit id; idempotency guarantees no double-advance.
    #[error("rotation state write failed: {0}")]
    WriteFailed(#[source] RotationStoreError),

    /// Compare-and-swap retries were exhausted under sustained contention.
    #[error("rotation assignment for unit {unit_id} abandoned after {attempts} contended attempts")]
    Contention {
        /// The unit of work being assigned.
        unit_id: UnitId,
        /// Number of compare-and-swap attempts made.
        attempts: u32,
    },

    /// Domain validation failed while loading or advancing state.
    #[error(transparent)]
    Domain(#[from] RotationDomainError),
}
