//! Command-line front end for the tandem orchestration library.
//!
//! Usage:
//!
//! ```text
//! tandem assign <unit-id>
//! tandem generate <unit-id> <operation-json> [--phase P] [--anchor A]
//! tandem validate <instruction-file> [--role coder|tester]
//! tandem status
//! ```
//!
//! Rotation state, audit artifacts, and onboarding references live in
//! directories selected by `--state-dir`, `--artifacts-dir`, and
//! `--reference-dir`. Validation exits 0 when fully compliant, 1 on
//! error-severity findings, and 2 when only warnings were raised.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;

use tandem::compliance::{
    adapters::{DirArtifactSink, DirReferenceLibrary},
    domain::{ComplianceReport, RuleSet},
    services::ComplianceValidator,
};
use tandem::instruction::{
    domain::{Instruction, Operation},
    services::{ContextSeed, InstructionProtocol, review_instruction},
};
use tandem::pipeline::{PipelineError, TaskPipeline};
use tandem::rotation::{
    adapters::FileRotationStore,
    domain::{AnchorId, PhaseId, TaskRole, UnitId},
    services::RotationService,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const EXIT_WARNINGS: u8 = 2;

/// Dual-agent task orchestration: role rotation, signed instructions, and
/// pre-dispatch compliance validation.
#[derive(Parser)]
#[command(name = "tandem", version)]
struct Cli {
    /// Directory holding the rotation state document.
    #[arg(long, default_value = ".tandem/state")]
    state_dir: Utf8PathBuf,

    /// Directory receiving instruction, report, and governance artifacts.
    #[arg(long, default_value = ".tandem/artifacts")]
    artifacts_dir: Utf8PathBuf,

    /// Directory of agent onboarding documents (`<agent>-onboarding.md`).
    #[arg(long, default_value = ".tandem/reference")]
    reference_dir: Utf8PathBuf,

    /// JSON rule-set file overriding the built-in governance rules.
    #[arg(long)]
    rules: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign coder and tester roles for a unit of work.
    ///
    /// Repeating the command for a recorded unit reports the existing
    /// assignment without advancing the rotation.
    Assign {
        /// The unit of work to assign.
        unit_id: String,
    },

    /// Generate, sign, validate, and record an instruction for a unit.
    Generate {
        /// The unit of work the instruction covers.
        unit_id: String,

        /// The operation descriptor as JSON:
        /// `{"kind": ..., "action": ..., "parameters": {...}}`.
        operation: String,

        /// Project phase the unit belongs to.
        #[arg(long, default_value = "unphased")]
        phase: String,

        /// Governance anchor to cite; omitting it raises a warning.
        #[arg(long)]
        anchor: Option<String>,
    },

    /// Validate a stored instruction file and evaluate its compliance.
    Validate {
        /// Path to the instruction JSON file.
        instruction: Utf8PathBuf,

        /// Role whose rules to evaluate the task text against.
        #[arg(long, value_enum, default_value_t = RoleArg::Coder)]
        role: RoleArg,
    },

    /// Print the current rotation pointer and assignment history.
    Status,
}

/// CLI-facing task role selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    /// Evaluate the coder's rules.
    Coder,
    /// Evaluate the tester's rules.
    Tester,
}

impl From<RoleArg> for TaskRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Coder => Self::Coder,
            RoleArg::Tester => Self::Tester,
        }
    }
}

type CliValidator = ComplianceValidator<DirReferenceLibrary, DirArtifactSink, DefaultClock>;
type CliPipeline =
    TaskPipeline<FileRotationStore, DirReferenceLibrary, DirArtifactSink, DefaultClock>;

struct Components {
    rotation: RotationService<FileRotationStore>,
    validator: CliValidator,
    pipeline: CliPipeline,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode, BoxError> {
    let components = build_components(&cli)?;
    match cli.command {
        Command::Assign { unit_id } => run_assign(&components, &unit_id).await,
        Command::Generate {
            unit_id,
            operation,
            phase,
            anchor,
        } => {
            let seed = build_seed(&unit_id, &phase, anchor.as_deref())?;
            run_generate(&components, parse_operation(&operation)?, seed).await
        }
        Command::Validate { instruction, role } => {
            run_validate(&components, &instruction, role.into()).await
        }
        Command::Status => run_status(&components).await,
    }
}

fn build_components(cli: &Cli) -> Result<Components, BoxError> {
    let store = FileRotationStore::new(open_dir(&cli.state_dir)?);
    let rotation = RotationService::new(Arc::new(store));
    let clock = Arc::new(DefaultClock);

    let reference = Arc::new(DirReferenceLibrary::new(open_dir(&cli.reference_dir)?));
    let artifacts = Arc::new(DirArtifactSink::new(open_dir(&cli.artifacts_dir)?));
    let rules = load_rules(cli.rules.as_deref())?;

    let protocol = InstructionProtocol::new(rotation.clone(), Arc::clone(&clock));
    let validator = ComplianceValidator::new(
        rules.clone(),
        Arc::clone(&reference),
        Arc::clone(&artifacts),
        Arc::clone(&clock),
    );
    let pipeline = TaskPipeline::new(
        protocol,
        ComplianceValidator::new(rules, reference, Arc::clone(&artifacts), clock),
        artifacts,
    );

    Ok(Components {
        rotation,
        validator,
        pipeline,
    })
}

fn open_dir(path: &Utf8Path) -> Result<cap_std::fs_utf8::Dir, BoxError> {
    std::fs::create_dir_all(path)?;
    let dir = cap_std::fs_utf8::Dir::open_ambient_dir(path, cap_std::ambient_authority())?;
    Ok(dir)
}

fn load_rules(path: Option<&Utf8Path>) -> Result<RuleSet, BoxError> {
    let rules = match path {
        Some(file) => RuleSet::from_json(&std::fs::read_to_string(file)?)?,
        None => RuleSet::builtin()?,
    };
    Ok(rules)
}

fn build_seed(unit_id: &str, phase: &str, anchor: Option<&str>) -> Result<ContextSeed, BoxError> {
    let mut seed = ContextSeed::new(UnitId::new(unit_id)?, PhaseId::new(phase)?);
    if let Some(cited) = anchor {
        seed = seed.with_anchor(AnchorId::new(cited)?);
    }
    Ok(seed)
}

fn parse_operation(json: &str) -> Result<Operation, BoxError> {
    Ok(serde_json::from_str(json)?)
}

async fn run_assign(components: &Components, unit_id: &str) -> Result<ExitCode, BoxError> {
    let assignment = components
        .rotation
        .assign_roles(UnitId::new(unit_id)?)
        .await?;
    emit_json(&serde_json::to_value(&assignment)?)?;
    Ok(ExitCode::SUCCESS)
}

async fn run_generate(
    components: &Components,
    operation: Operation,
    seed: ContextSeed,
) -> Result<ExitCode, BoxError> {
    match components.pipeline.dispatch(operation, seed).await {
        Ok(outcome) => {
            emit_json(&serde_json::to_value(outcome.instruction())?)?;
            if outcome.has_warnings() {
                Ok(ExitCode::from(EXIT_WARNINGS))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Err(PipelineError::ComplianceBlocked(report)) => {
            emit_json(&serde_json::to_value(report.as_ref())?)?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_validate(
    components: &Components,
    path: &Utf8Path,
    role: TaskRole,
) -> Result<ExitCode, BoxError> {
    let instruction: Instruction = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let review = review_instruction(&instruction);
    let report = components.validator.evaluate(&instruction, role).await;
    components.validator.record_verdict(&report).await?;

    emit_json(&serde_json::json!({
        "structural_errors": review.errors().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "structural_warnings": review.warnings().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "report": report,
    }))?;
    Ok(validation_exit_code(
        review.is_valid(),
        review.warnings().is_empty(),
        &report,
    ))
}

fn validation_exit_code(
    structurally_valid: bool,
    no_structural_warnings: bool,
    report: &ComplianceReport,
) -> ExitCode {
    if !structurally_valid || !report.allows_dispatch() {
        ExitCode::FAILURE
    } else if !no_structural_warnings || report.is_actionable() {
        ExitCode::from(EXIT_WARNINGS)
    } else {
        ExitCode::SUCCESS
    }
}

async fn run_status(components: &Components) -> Result<ExitCode, BoxError> {
    let current_coder = components.rotation.current_coder().await?;
    let history = components.rotation.history().await?;
    emit_json(&serde_json::json!({
        "current_coder": current_coder,
        "assignments": history,
    }))?;
    Ok(ExitCode::SUCCESS)
}

#[expect(clippy::print_stdout, reason = "command output belongs on stdout")]
fn emit_json(value: &serde_json::Value) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
