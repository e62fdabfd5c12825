//! Compliance reports: the aggregated verdict for one instruction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rotation::domain::{AgentId, TaskRole, UnitId};

use super::Severity;

/// Aggregated verdict across every evaluated rule.
///
/// A single error always dominates any number of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Every applicable rule passed.
    Compliant,
    /// Warning-severity violations only; execution may proceed.
    Warnings,
    /// At least one error-severity violation; execution is blocked.
    Violations,
}

impl OverallStatus {
    /// Returns the status as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Warnings => "warnings",
            Self::Violations => "violations",
        }
    }

    /// Derives the dominant status from a violation list.
    #[must_use]
    pub fn from_violations(violations: &[Violation]) -> Self {
        if violations
            .iter()
            .any(|violation| violation.severity == Severity::Error)
        {
            Self::Violations
        } else if violations
            .iter()
            .any(|violation| violation.severity == Severity::Warning)
        {
            Self::Warnings
        } else {
            Self::Compliant
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The violated rule.
    pub rule_id: String,
    /// Severity inherited from the rule.
    pub severity: Severity,
    /// What went wrong ("required content missing" / "forbidden content
    /// present" / onboarding failures).
    pub description: String,
    /// The specific pattern or document involved.
    pub detail: String,
}

impl Violation {
    /// Creates a violation record.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            description: description.into(),
            detail: detail.into(),
        }
    }
}

/// The complete, immutable verdict for one instruction evaluation.
///
/// Created fresh per validation call and persisted as an audit artifact;
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// When the evaluation ran.
    pub timestamp: DateTime<Utc>,
    /// The unit of work the instruction covers.
    pub unit_id: UnitId,
    /// The agent whose task text was evaluated.
    pub agent: AgentId,
    /// The role that agent holds for the unit.
    pub role: TaskRole,
    /// Number of rules evaluated (every applicable rule, no short-circuit).
    pub checks_run: usize,
    /// Rules that recorded no violation.
    pub passed: usize,
    /// Count of warning-severity violations.
    pub warnings: usize,
    /// Count of error-severity violations.
    pub errors: usize,
    /// Every recorded violation, in rule order.
    pub violations: Vec<Violation>,
    /// The dominant verdict.
    pub overall_status: OverallStatus,
    /// Remediation guidance derived from the violated rules.
    pub recommendations: Vec<String>,
}

/// Inputs identifying what was evaluated, grouped for report assembly.
#[derive(Debug, Clone)]
pub struct ReportSubject {
    /// The unit of work.
    pub unit_id: UnitId,
    /// The acting agent.
    pub agent: AgentId,
    /// The acting agent's role.
    pub role: TaskRole,
}

impl ComplianceReport {
    /// Assembles a report, deriving counts, status, and recommendations
    /// from the violation list.
    #[must_use]
    pub fn aggregate(
        subject: ReportSubject,
        timestamp: DateTime<Utc>,
        checks_run: usize,
        violations: Vec<Violation>,
        recommendations: Vec<String>,
    ) -> Self {
        let errors = violations
            .iter()
            .filter(|violation| violation.severity == Severity::Error)
            .count();
        let warnings = violations
            .iter()
            .filter(|violation| violation.severity == Severity::Warning)
            .count();
        let violated_rules: std::collections::HashSet<&str> = violations
            .iter()
            .map(|violation| violation.rule_id.as_str())
            .collect();
        let passed = checks_run.saturating_sub(violated_rules.len());
        let overall_status = OverallStatus::from_violations(&violations);

        Self {
            timestamp,
            unit_id: subject.unit_id,
            agent: subject.agent,
            role: subject.role,
            checks_run,
            passed,
            warnings,
            errors,
            violations,
            overall_status,
            recommendations,
        }
    }

    /// Returns `true` when dispatch is allowed (no error-severity violation).
    #[must_use]
    pub fn allows_dispatch(&self) -> bool {
        self.overall_status != OverallStatus::Violations
    }

    /// Returns `true` when the report needs operator attention.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.overall_status != OverallStatus::Compliant
    }
}
