//! Port contracts for compliance validation.

pub mod artifact;
pub mod reference;

pub use artifact::{ArtifactResult, ArtifactSink};
pub use reference::{OnboardingReference, ReferenceLookup};
