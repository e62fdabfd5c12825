//! Role rotation state machine.
//!
//! Guarantees that coding and testing responsibility for successive units of
//! work strictly alternates between the two known agents, and that the
//! guarantee survives process restarts. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The alternation service in [`services`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tandem::rotation::adapters::InMemoryRotationStore;
//! use tandem::rotation::domain::{AgentId, UnitId};
//! use tandem::rotation::services::RotationService;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let service = RotationService::new(Arc::new(InMemoryRotationStore::new()));
//! let first = service
//!     .assign_roles(UnitId::new("step-1").expect("valid unit id"))
//!     .await
//!     .expect("assignment succeeds");
//! assert_eq!(first.coder(), AgentId::Claude);
//! assert_eq!(first.tester(), AgentId::Gizmo);
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
