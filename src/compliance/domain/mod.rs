//! Domain types for compliance validation.

mod report;
mod rule;

pub use report::{ComplianceReport, OverallStatus, ReportSubject, Violation};
pub use rule::{
    CompiledRule, ComplianceRule, ONBOARDING_RULE_ID, RoleApplicability, RuleSet, Severity,
    builtin_rules,
};
