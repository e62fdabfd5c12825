//! Adapters implementing the compliance ports.

pub mod fs;
pub mod memory;

pub use fs::{DirArtifactSink, DirReferenceLibrary};
pub use memory::{InMemoryArtifactSink, InMemoryReferenceLibrary};
