//! Compliance integration tests: tamper detection and custom rule sets.

use crate::in_memory::helpers::{
    COMPLIANT_TASK, PipelineParts, operation_with, pipeline, runtime, seed_for,
};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tandem::compliance::{
    adapters::{InMemoryArtifactSink, InMemoryReferenceLibrary},
    domain::{OverallStatus, RuleSet},
    services::ComplianceValidator,
};
use tandem::instruction::{domain::Instruction, error::ReviewIssue, services::review_instruction};
use tandem::rotation::domain::TaskRole;
use tokio::runtime::Runtime;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CUSTOM_RULES: &str = r#"[
    {
        "rule_id": "CHANGELOG_UPDATED",
        "description": "Task must mention the changelog entry",
        "severity": "error",
        "required_patterns": ["(?i)changelog"],
        "applicable_roles": "both"
    }
]"#;

/// A dispatched instruction edited in transit fails signature review.
#[rstest]
fn tampered_instruction_fails_signature_review(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, _sink) = pipeline?;

    let outcome =
        rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?))?;

    let mut value = serde_json::to_value(outcome.instruction())?;
    value["operation"]["action"] = serde_json::json!("exfiltrate-data");
    let tampered: Instruction = serde_json::from_value(value)?;

    let review = review_instruction(&tampered);
    assert!(!review.is_valid());
    assert!(
        review
            .errors()
            .iter()
            .any(|issue| *issue == ReviewIssue::SignatureMismatch)
    );
    Ok(())
}

/// A validator built from a JSON rule set enforces the custom rules in
/// place of the built-in ones.
#[rstest]
fn custom_rule_set_drives_evaluation(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, _sink) = pipeline?;
    let outcome =
        rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?))?;

    let validator = ComplianceValidator::new(
        RuleSet::from_json(CUSTOM_RULES)?,
        Arc::new(InMemoryReferenceLibrary::with_both_agents()),
        Arc::new(InMemoryArtifactSink::new()),
        Arc::new(DefaultClock),
    );

    let report = rt.block_on(validator.evaluate(outcome.instruction(), TaskRole::Coder));

    assert_eq!(report.checks_run, 1);
    assert_eq!(report.overall_status, OverallStatus::Violations);
    assert!(
        report
            .violations
            .iter()
            .any(|violation| violation.rule_id == "CHANGELOG_UPDATED")
    );
    Ok(())
}
