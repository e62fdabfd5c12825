//! Filesystem adapters for compliance ports.
//!
//! Both adapters operate inside capability-scoped directories: the
//! reference library reads `<agent>-onboarding.md`, and the artifact sink
//! writes the audit tree (`instructions/`, `reports/`, `governance/`).

use async_trait::async_trait;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::compliance::{
    domain::ComplianceReport,
    error::{ArtifactError, ReferenceError},
    ports::{ArtifactResult, ArtifactSink, OnboardingReference, ReferenceLookup},
};
use crate::instruction::domain::Instruction;
use crate::rotation::domain::{AgentId, UnitId};

/// Resolves onboarding documents from a directory of markdown files.
#[derive(Debug, Clone)]
pub struct DirReferenceLibrary {
    dir: Arc<Dir>,
}

impl DirReferenceLibrary {
    /// Creates a library over an open directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    fn document_name(agent: AgentId) -> String {
        format!("{agent}-onboarding.md")
    }
}

#[async_trait]
impl ReferenceLookup for DirReferenceLibrary {
    async fn onboarding_reference(
        &self,
        agent: AgentId,
    ) -> Result<Option<OnboardingReference>, ReferenceError> {
        let name = Self::document_name(agent);
        match self.dir.metadata(&name) {
            Ok(metadata) if metadata.is_file() => {
                Ok(Some(OnboardingReference::new(agent, name)))
            }
            Ok(_) => Ok(None),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ReferenceError::new(err)),
        }
    }
}

const INSTRUCTIONS_DIR: &str = "instructions";
const REPORTS_DIR: &str = "reports";
const GOVERNANCE_DIR: &str = "governance";

/// Writes audit artifacts as files under a root directory.
///
/// Layout: `instructions/<unit>.json`, `reports/<unit>-<role>.json`,
/// `governance/<unit>-warning.md`.
#[derive(Debug, Clone)]
pub struct DirArtifactSink {
    dir: Arc<Dir>,
}

impl DirArtifactSink {
    /// Creates a sink over an open directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    /// Unit ids come from the tracking system and may contain path
    /// separators; flatten them before use as file names.
    fn file_key(unit_id: &UnitId) -> String {
        unit_id.as_str().replace(['/', '\\'], "-")
    }

    fn write_file(&self, subdir: &str, name: &str, contents: &[u8]) -> ArtifactResult<()> {
        self.dir
            .create_dir_all(subdir)
            .map_err(ArtifactError::write_failed)?;
        self.dir
            .write(format!("{subdir}/{name}"), contents)
            .map_err(ArtifactError::write_failed)?;
        Ok(())
    }
}

#[async_trait]
impl ArtifactSink for DirArtifactSink {
    async fn record_instruction(&self, instruction: &Instruction) -> ArtifactResult<()> {
        let json =
            serde_json::to_vec_pretty(instruction).map_err(ArtifactError::write_failed)?;
        let name = format!("{}.json", Self::file_key(instruction.context().unit_id()));
        self.write_file(INSTRUCTIONS_DIR, &name, &json)
    }

    async fn record_report(&self, report: &ComplianceReport) -> ArtifactResult<()> {
        let json = serde_json::to_vec_pretty(report).map_err(ArtifactError::write_failed)?;
        let name = format!("{}-{}.json", Self::file_key(&report.unit_id), report.role);
        self.write_file(REPORTS_DIR, &name, &json)
    }

    async fn record_governance_warning(
        &self,
        unit_id: &UnitId,
        markdown: &str,
    ) -> ArtifactResult<()> {
        let name = format!("{}-warning.md", Self::file_key(unit_id));
        self.write_file(GOVERNANCE_DIR, &name, markdown.as_bytes())
    }
}
