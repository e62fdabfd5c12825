//! Services orchestrating compliance evaluation.

pub mod validator;

pub use validator::{BatchOutcome, ComplianceValidator, render_governance_warning};
