//! Tandem: dual-agent task orchestration.
//!
//! This crate coordinates two coding agents working in tandem: it rotates
//! the coder and tester roles between them per unit of work, issues signed
//! structured instructions, and validates every instruction against a
//! governance rule set before dispatch.
//!
//! # Architecture
//!
//! Tandem follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (filesystem, in-memory)
//!
//! # Modules
//!
//! - [`rotation`]: Deterministic coder/tester role rotation per unit
//! - [`instruction`]: Signed, tamper-evident instruction protocol
//! - [`compliance`]: Rule-based pre-dispatch validation and reporting
//! - [`pipeline`]: End-to-end dispatch orchestration

pub mod compliance;
pub mod instruction;
pub mod pipeline;
pub mod rotation;
