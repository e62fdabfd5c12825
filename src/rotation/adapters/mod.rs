//! Adapter implementations of the rotation store port.

pub mod file;
pub mod memory;

pub use file::FileRotationStore;
pub use memory::InMemoryRotationStore;
