//! Rotation service: the coder/tester alternation state machine.

use std::sync::Arc;

use crate::rotation::{
    domain::{AgentId, RoleAssignment, RotationState, UnitId},
    error::RotationError,
    ports::{RotationStateStore, RotationStoreError, VersionedState},
};

/// Upper bound on compare-and-swap retries before an assignment attempt is
/// abandoned as contended.
const MAX_CAS_ATTEMPTS: u32 = 8;

/// Service guaranteeing strict coder/tester alternation across units of work.
///
/// The service is stateless; all mutable state lives behind the injected
/// [`RotationStateStore`]. Concurrent calls for different units proceed in
/// parallel; calls for the same unit are serialised by the store's version
/// check, and a retry that loses the race returns the winner's recorded
/// assignment.
#[derive(Clone)]
pub struct RotationService<S>
where
    S: RotationStateStore,
{
    store: Arc<S>,
}

impl<S> RotationService<S>
where
    S: RotationStateStore,
{
    /// Creates a rotation service backed by the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Assigns coder and tester roles for a unit of work.
    ///
    /// Re-invoking with a unit id that already has a recorded assignment
    /// returns that assignment unchanged and does not advance the rotation.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::StateUnavailable`] when the store cannot be
    /// read, [`RotationError::WriteFailed`] when the advanced state cannot
    /// be persisted, and [`RotationError::Contention`] when compare-and-swap
    /// retries are exhausted.
    pub async fn assign_roles(&self, unit_id: UnitId) -> Result<RoleAssignment, RotationError> {
        for attempt in 0..MAX_CAS_ATTEMPTS {
            let (mut state, version) = self.load_state().await?;

            if let Some(existing) = state.assignment_for(&unit_id) {
                tracing::debug!(
                    unit_id = %unit_id,
                    coder = %existing.coder(),
                    "returning recorded assignment for retried unit"
                );
                return Ok(existing.clone());
            }

            let assignment = state.assign(unit_id.clone())?;
            match self.store.save(&state, version).await {
                Ok(_) => {
                    tracing::info!(
                        unit_id = %unit_id,
                        coder = %assignment.coder(),
                        tester = %assignment.tester(),
                        "role assignment recorded"
                    );
                    return Ok(assignment);
                }
                Err(RotationStoreError::VersionConflict { .. }) => {
                    tracing::debug!(
                        unit_id = %unit_id,
                        attempt,
                        "rotation state advanced concurrently, retrying"
                    );
                }
                Err(err) => return Err(RotationError::WriteFailed(err)),
            }
        }

        Err(RotationError::Contention {
            unit_id,
            attempts: MAX_CAS_ATTEMPTS,
        })
    }

    /// Returns the full assignment history for audit, oldest first.
    ///
    /// Read-only; does not mutate rotation state.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::StateUnavailable`] when the store cannot be
    /// read.
    pub async fn history(&self) -> Result<Vec<RoleAssignment>, RotationError> {
        let (state, _) = self.load_state().await?;
        Ok(state.history().to_vec())
    }

    /// Returns the agent that will code the next fresh unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::StateUnavailable`] when the store cannot be
    /// read.
    pub async fn current_coder(&self) -> Result<AgentId, RotationError> {
        let (state, _) = self.load_state().await?;
        Ok(state.current_coder())
    }

    async fn load_state(&self) -> Result<(RotationState, Option<u64>), RotationError> {
        let loaded = self
            .store
            .load()
            .await
            .map_err(RotationError::StateUnavailable)?;
        Ok(loaded.map_or((RotationState::initial(), None), |versioned| {
            let VersionedState { state, version } = versioned;
            (state, Some(version))
        }))
    }
}
