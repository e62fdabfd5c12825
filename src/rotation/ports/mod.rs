//! Port contracts for the rotation state machine.

pub mod store;

pub use store::{RotationStateStore, RotationStoreError, StoreResult, VersionedState};
