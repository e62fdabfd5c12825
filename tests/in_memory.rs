//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `rotation_tests`: Role alternation, idempotent reassignment, history
//! - `dispatch_tests`: Full pipeline dispatch outcomes and audit artifacts
//! - `compliance_tests`: Tamper detection and custom rule sets
//! - `artifact_tests`: Filesystem artifact sink layout

mod in_memory {
    pub mod helpers;

    mod artifact_tests;
    mod compliance_tests;
    mod dispatch_tests;
    mod rotation_tests;
}
