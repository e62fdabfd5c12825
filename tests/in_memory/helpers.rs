//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

use tandem::compliance::{
    adapters::{InMemoryArtifactSink, InMemoryReferenceLibrary},
    domain::RuleSet,
    services::ComplianceValidator,
};
use tandem::instruction::{
    domain::Operation,
    services::{ContextSeed, InstructionProtocol},
};
use tandem::pipeline::TaskPipeline;
use tandem::rotation::{
    adapters::InMemoryRotationStore,
    domain::{PhaseId, UnitId},
    services::RotationService,
};

/// Pipeline wired entirely to in-memory adapters.
pub type TestPipeline = TaskPipeline<
    InMemoryRotationStore,
    InMemoryReferenceLibrary,
    InMemoryArtifactSink,
    DefaultClock,
>;

/// A wired pipeline plus a handle on its artifact sink.
pub type PipelineParts = (TestPipeline, InMemoryArtifactSink);

/// Task text satisfying every coder rule.
pub const COMPLIANT_TASK: &str =
    "Implement per manual reference 4.2, cite step anchor OF-8.8, record in the governance log";

/// Task text missing only the governance log entry (warning-severity).
pub const WARNED_TASK: &str = "Implement per manual reference 4.2, cite step anchor OF-8.8";

/// Task text tripping error-severity rules.
pub const DESTRUCTIVE_TASK: &str = "Implement quickly, run rm -rf build to save time";

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a rotation service over a fresh in-memory store.
#[fixture]
pub fn rotation() -> RotationService<InMemoryRotationStore> {
    RotationService::new(Arc::new(InMemoryRotationStore::new()))
}

/// Provides a fully wired pipeline plus a handle on its artifact sink.
///
/// # Errors
///
/// Returns an error if the built-in rule set fails to compile.
#[fixture]
pub fn pipeline() -> Result<PipelineParts, Box<dyn std::error::Error + Send + Sync>> {
    let rotation = RotationService::new(Arc::new(InMemoryRotationStore::new()));
    let sink = InMemoryArtifactSink::new();
    let protocol = InstructionProtocol::new(rotation, Arc::new(DefaultClock));
    let validator = ComplianceValidator::new(
        RuleSet::builtin()?,
        Arc::new(InMemoryReferenceLibrary::with_both_agents()),
        Arc::new(sink.clone()),
        Arc::new(DefaultClock),
    );
    let pipeline = TaskPipeline::new(protocol, validator, Arc::new(sink.clone()));
    Ok((pipeline, sink))
}

/// Builds a step-execution operation around a task description.
pub fn operation_with(description: &str) -> Operation {
    Operation::new(
        "step-execution",
        "implement-step",
        json!({ "description": description }),
    )
}

/// Builds a context seed for a unit under the test phase.
///
/// # Errors
///
/// Returns an error when the unit id is blank.
pub fn seed_for(unit_id: &str) -> Result<ContextSeed, Box<dyn std::error::Error + Send + Sync>> {
    Ok(ContextSeed::new(
        UnitId::new(unit_id)?,
        PhaseId::new("OF-8.8")?,
    ))
}
