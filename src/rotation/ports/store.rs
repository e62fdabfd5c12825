//! Durable state store port for the rotation state machine.
//!
//! The store is the single piece of shared mutable state in the protocol.
//! Implementations provide optimistic concurrency through a version counter:
//! `save` only succeeds when the caller's expected version matches what the
//! store holds, which serialises concurrent assignment attempts without a
//! process-wide lock.

use crate::rotation::domain::RotationState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for rotation store operations.
pub type StoreResult<T> = Result<T, RotationStoreError>;

/// A rotation state snapshot paired with its store version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedState {
    /// The persisted rotation state.
    pub state: RotationState,
    /// Monotonic version counter, incremented on every successful save.
    pub version: u64,
}

impl VersionedState {
    /// Creates a versioned snapshot.
    #[must_use]
    pub const fn new(state: RotationState, version: u64) -> Self {
        Self { state, version }
    }
}

/// Durable rotation state persistence contract.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Return `Ok(None)` from `load` when no state has ever been persisted
/// - Persist atomically: a crashed `save` leaves either the old or the new
///   record, never a torn one
/// - Reject a `save` whose `expected_version` does not match the stored
///   version with [`RotationStoreError::VersionConflict`]
#[async_trait]
pub trait RotationStateStore: Send + Sync {
    /// Loads the current state and its version.
    ///
    /// Returns `Ok(None)` on first-ever use, before any state was saved.
    ///
    /// # Errors
    ///
    /// Returns [`RotationStoreError::Unavailable`] when the backing store
    /// cannot be reached or its contents cannot be decoded.
    async fn load(&self) -> StoreResult<Option<VersionedState>>;

    /// Persists a new state, conditional on the expected current version.
    ///
    /// `expected_version` is `None` when the caller believes no state exists
    /// yet. On success, returns the new version.
    ///
    /// # Errors
    ///
    /// Returns [`RotationStoreError::VersionConflict`] when another writer
    /// advanced the state first, or [`RotationStoreError::WriteFailed`] when
    /// persistence fails.
    async fn save(&self, state: &RotationState, expected_version: Option<u64>)
    -> StoreResult<u64>;
}

/// Errors returned by rotation store implementations.
#[derive(Debug, Clone, Error)]
pub enum RotationStoreError {
    /// The backing store is unreachable or unreadable.
    #[error("rotation state store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The state could not be persisted.
    #[error("rotation state write failed: {0}")]
    WriteFailed(Arc<dyn std::error::Error + Send + Sync>),

    /// Another writer advanced the state since it was loaded.
    #[error("rotation state version conflict: expected {expected:?}, found {actual:?}")]
    VersionConflict {
        /// The version the caller loaded.
        expected: Option<u64>,
        /// The version the store currently holds.
        actual: Option<u64>,
    },
}

impl RotationStoreError {
    /// Wraps an unavailability cause.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a write failure cause.
    #[must_use]
    pub fn write_failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::WriteFailed(Arc::new(err))
    }
}
