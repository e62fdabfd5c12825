//! Instruction protocol.
//!
//! Produces self-describing, tamper-evident units of dispatchable work. An
//! instruction embeds the role assignment for its unit of work (obtained
//! from the [rotation](crate::rotation) module) and carries a SHA-256
//! signature over a canonical serialization of every other field, so any
//! post-creation edit is detectable by an independent verifier.
//!
//! - Domain types in [`domain`]
//! - Error and finding types in [`error`]
//! - The protocol service in [`services`]

pub mod domain;
pub mod error;
pub mod services;

#[cfg(test)]
mod tests;
