//! Pipeline dispatch tests: outcomes, blocking, and audit artifacts.

use crate::in_memory::helpers::{
    COMPLIANT_TASK, DESTRUCTIVE_TASK, PipelineParts, WARNED_TASK, operation_with, pipeline,
    runtime, seed_for,
};
use rstest::rstest;
use std::io;
use tandem::compliance::domain::OverallStatus;
use tandem::instruction::services::review_instruction;
use tandem::pipeline::PipelineError;
use tandem::rotation::domain::AgentId;
use tokio::runtime::Runtime;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A compliant dispatch records the instruction and report, emits no
/// governance warning, and the instruction reviews clean.
#[rstest]
fn compliant_dispatch_records_audit_trail(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, sink) = pipeline?;

    let outcome = rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?))?;

    assert!(!outcome.has_warnings());
    assert_eq!(outcome.report().overall_status, OverallStatus::Compliant);
    assert_eq!(outcome.instruction().issuing_agent(), AgentId::Claude);

    let review = review_instruction(outcome.instruction());
    assert!(review.is_valid());

    assert_eq!(sink.instructions().len(), 1);
    assert_eq!(sink.reports().len(), 1);
    assert!(sink.governance_warnings().is_empty());
    Ok(())
}

/// A warnings-only verdict still dispatches, with the report attached and
/// the open findings surfaced as a governance warning.
#[rstest]
fn warned_dispatch_proceeds_with_report(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, sink) = pipeline?;

    let outcome = rt.block_on(dispatcher.dispatch(operation_with(WARNED_TASK), seed_for("step-1")?))?;

    assert!(outcome.has_warnings());
    assert_eq!(outcome.report().overall_status, OverallStatus::Warnings);
    assert!(outcome.report().allows_dispatch());
    assert_eq!(sink.governance_warnings().len(), 1);
    Ok(())
}

/// Error-severity violations block the dispatch and leave the full audit
/// trail behind: instruction, report, and governance warning.
#[rstest]
fn blocked_dispatch_leaves_governance_warning(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, sink) = pipeline?;

    let result =
        rt.block_on(dispatcher.dispatch(operation_with(DESTRUCTIVE_TASK), seed_for("step-1")?));

    let Err(PipelineError::ComplianceBlocked(report)) = result else {
        return Err("expected dispatch to be blocked".into());
    };
    assert_eq!(report.overall_status, OverallStatus::Violations);
    assert!(report.errors > 0);

    assert_eq!(sink.instructions().len(), 1);
    assert_eq!(sink.reports().len(), 1);
    assert_eq!(sink.governance_warnings().len(), 1);
    Ok(())
}

/// Dispatching a second fresh unit rotates the issuing agent.
#[rstest]
fn successive_dispatches_rotate_issuing_agent(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, _sink) = pipeline?;

    let first = rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?))?;
    let second =
        rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-2")?))?;

    assert_eq!(first.instruction().issuing_agent(), AgentId::Claude);
    assert_eq!(second.instruction().issuing_agent(), AgentId::Gizmo);
    Ok(())
}

/// Re-dispatching a recorded unit reuses its role assignment.
#[rstest]
fn redispatch_keeps_recorded_assignment(
    runtime: io::Result<Runtime>,
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let (dispatcher, sink) = pipeline?;

    let first = rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?))?;
    let second =
        rt.block_on(dispatcher.dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?))?;

    assert_eq!(
        first.instruction().context().role_assignment(),
        second.instruction().context().role_assignment()
    );
    assert_ne!(
        first.instruction().instruction_id(),
        second.instruction().instruction_id()
    );
    assert_eq!(sink.instructions().len(), 2);
    Ok(())
}
