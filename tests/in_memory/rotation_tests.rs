//! Rotation integration tests: alternation, idempotency, history.

use crate::in_memory::helpers::{rotation, runtime};
use rstest::rstest;
use std::io;
use tandem::rotation::{
    adapters::InMemoryRotationStore,
    domain::{AgentId, UnitId},
    services::RotationService,
};
use tokio::runtime::Runtime;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn unit(id: &str) -> Result<UnitId, BoxError> {
    Ok(UnitId::new(id)?)
}

/// Three consecutive fresh units alternate the coder strictly.
#[rstest]
fn coder_alternates_across_fresh_units(
    runtime: io::Result<Runtime>,
    rotation: RotationService<InMemoryRotationStore>,
) -> Result<(), BoxError> {
    let rt = runtime?;

    let first = rt.block_on(rotation.assign_roles(unit("step-1")?))?;
    let second = rt.block_on(rotation.assign_roles(unit("step-2")?))?;
    let third = rt.block_on(rotation.assign_roles(unit("step-3")?))?;

    assert_eq!(first.coder(), AgentId::Claude);
    assert_eq!(second.coder(), AgentId::Gizmo);
    assert_eq!(third.coder(), AgentId::Claude);
    assert_eq!(first.tester(), AgentId::Gizmo);
    assert_eq!(second.tester(), AgentId::Claude);
    Ok(())
}

/// Reassigning a recorded unit returns the original assignment and leaves
/// the rotation pointer untouched.
#[rstest]
fn reassignment_does_not_advance_rotation(
    runtime: io::Result<Runtime>,
    rotation: RotationService<InMemoryRotationStore>,
) -> Result<(), BoxError> {
    let rt = runtime?;

    let original = rt.block_on(rotation.assign_roles(unit("step-1")?))?;
    let repeated = rt.block_on(rotation.assign_roles(unit("step-1")?))?;
    assert_eq!(original, repeated);

    let next = rt.block_on(rotation.current_coder())?;
    assert_eq!(next, AgentId::Gizmo);

    let history = rt.block_on(rotation.history())?;
    assert_eq!(history.len(), 1);
    Ok(())
}

/// History lists assignments oldest first.
#[rstest]
fn history_preserves_assignment_order(
    runtime: io::Result<Runtime>,
    rotation: RotationService<InMemoryRotationStore>,
) -> Result<(), BoxError> {
    let rt = runtime?;

    rt.block_on(rotation.assign_roles(unit("step-1")?))?;
    rt.block_on(rotation.assign_roles(unit("step-2")?))?;

    let history = rt.block_on(rotation.history())?;
    let units: Vec<&str> = history
        .iter()
        .map(|assignment| assignment.unit_id().as_str())
        .collect();
    assert_eq!(units, vec!["step-1", "step-2"]);
    Ok(())
}
