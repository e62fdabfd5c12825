//! Unit tests for the compliance module.

mod report_tests;
mod rule_tests;
