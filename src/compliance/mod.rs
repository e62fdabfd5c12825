//! Compliance validation: rules, reports, and the evaluator.
//!
//! Instructions are checked against a declarative governance rule set
//! before dispatch. Each evaluation runs every rule applicable to the
//! acting role and produces an immutable [`domain::ComplianceReport`];
//! an error-severity violation blocks dispatch and emits a governance
//! warning artifact, while warnings surface without blocking.
//!
//! # Examples
//!
//! ```
//! use tandem::compliance::domain::RuleSet;
//!
//! let rules = RuleSet::builtin()?;
//! assert!(!rules.is_empty());
//! # Ok::<(), tandem::compliance::error::ConfigurationError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
