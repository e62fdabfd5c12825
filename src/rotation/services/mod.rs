//! Orchestration services for role rotation.

mod rotation;

pub use rotation::RotationService;
