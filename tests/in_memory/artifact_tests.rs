//! Filesystem artifact sink and reference library tests.

use crate::in_memory::helpers::{
    COMPLIANT_TASK, PipelineParts, TestPipeline, operation_with, pipeline, seed_for,
};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::rstest;
use tempfile::TempDir;

use tandem::compliance::{
    adapters::{DirArtifactSink, DirReferenceLibrary},
    domain::{ComplianceReport, ReportSubject},
    ports::{ArtifactSink, ReferenceLookup},
};
use tandem::instruction::domain::Instruction;
use tandem::rotation::domain::{AgentId, TaskRole, UnitId};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn open_dir(temp: &TempDir) -> Result<Dir, BoxError> {
    let path = temp.path().to_str().ok_or("non-utf8 temp path")?;
    Ok(Dir::open_ambient_dir(path, ambient_authority())?)
}

async fn dispatched_instruction(pipeline: &TestPipeline) -> Result<Instruction, BoxError> {
    let outcome = pipeline
        .dispatch(operation_with(COMPLIANT_TASK), seed_for("step-1")?)
        .await?;
    Ok(outcome.instruction().clone())
}

fn empty_report() -> Result<ComplianceReport, BoxError> {
    Ok(ComplianceReport::aggregate(
        ReportSubject {
            unit_id: UnitId::new("step-1")?,
            agent: AgentId::Claude,
            role: TaskRole::Coder,
        },
        chrono::Utc::now(),
        6,
        vec![],
        vec![],
    ))
}

/// Artifacts land in the documented subdirectory layout.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sink_writes_documented_layout(
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let temp = TempDir::new()?;
    let sink = DirArtifactSink::new(open_dir(&temp)?);
    let instruction = dispatched_instruction(&pipeline?.0).await?;

    sink.record_instruction(&instruction).await?;
    sink.record_report(&empty_report()?).await?;
    sink.record_governance_warning(&UnitId::new("step-1")?, "# warning")
        .await?;

    assert!(temp.path().join("instructions/step-1.json").is_file());
    assert!(temp.path().join("reports/step-1-coder.json").is_file());
    assert!(temp.path().join("governance/step-1-warning.md").is_file());
    Ok(())
}

/// A recorded instruction file parses back into an identical instruction.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recorded_instruction_round_trips(
    pipeline: Result<PipelineParts, BoxError>,
) -> Result<(), BoxError> {
    let temp = TempDir::new()?;
    let sink = DirArtifactSink::new(open_dir(&temp)?);
    let instruction = dispatched_instruction(&pipeline?.0).await?;

    sink.record_instruction(&instruction).await?;

    let contents = std::fs::read_to_string(temp.path().join("instructions/step-1.json"))?;
    let restored: Instruction = serde_json::from_str(&contents)?;
    assert_eq!(restored, instruction);
    Ok(())
}

/// The reference library resolves `<agent>-onboarding.md` and reports
/// absence as `None`, not an error.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reference_library_resolves_per_agent_documents() -> Result<(), BoxError> {
    let temp = TempDir::new()?;
    std::fs::write(temp.path().join("claude-onboarding.md"), "# Claude")?;
    let library = DirReferenceLibrary::new(open_dir(&temp)?);

    let found = library.onboarding_reference(AgentId::Claude).await?;
    let missing = library.onboarding_reference(AgentId::Gizmo).await?;

    let reference = found.ok_or("claude document should resolve")?;
    assert_eq!(reference.location, "claude-onboarding.md");
    assert!(missing.is_none());
    Ok(())
}
