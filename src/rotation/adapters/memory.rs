//! In-memory rotation store for tests and single-process use.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::rotation::{
    domain::RotationState,
    ports::{RotationStateStore, RotationStoreError, StoreResult, VersionedState},
};

/// Thread-safe in-memory rotation state store.
///
/// Versioning mirrors the durable adapters so the service's compare-and-swap
/// loop is exercised identically in tests and production.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRotationStore {
    slot: Arc<RwLock<Option<VersionedState>>>,
}

impl InMemoryRotationStore {
    /// Creates an empty store with no persisted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given state at version 1.
    #[must_use]
    pub fn with_state(state: RotationState) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(VersionedState::new(state, 1)))),
        }
    }
}

#[async_trait]
impl RotationStateStore for InMemoryRotationStore {
    async fn load(&self) -> StoreResult<Option<VersionedState>> {
        let slot = self
            .slot
            .read()
            .map_err(|err| RotationStoreError::unavailable(std::io::Error::other(err.to_string())))?;
        Ok(slot.clone())
    }

    async fn save(
        &self,
        state: &RotationState,
        expected_version: Option<u64>,
    ) -> StoreResult<u64> {
        let mut slot = self
            .slot
            .write()
            .map_err(|err| RotationStoreError::write_failed(std::io::Error::other(err.to_string())))?;

        let actual = slot.as_ref().map(|versioned| versioned.version);
        if actual != expected_version {
            return Err(RotationStoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        let next_version = actual.unwrap_or(0).saturating_add(1);
        *slot = Some(VersionedState::new(state.clone(), next_version));
        Ok(next_version)
    }
}
