//! Compliance evaluation service.
//!
//! Evaluates a signed instruction's task text against every applicable rule
//! for the acting role. Evaluation never short-circuits: all rules run so the
//! report names every problem at once. A failing reference lookup degrades to
//! an error-severity violation rather than aborting the evaluation.

use futures::future::join_all;
use minijinja::Environment;
use mockable::Clock;
use std::sync::Arc;

use crate::compliance::{
    domain::{
        ComplianceReport, CompiledRule, OverallStatus, ReportSubject, RuleSet, Violation,
        ONBOARDING_RULE_ID,
    },
    error::ArtifactError,
    ports::{ArtifactResult, ArtifactSink, ReferenceLookup},
};
use crate::instruction::domain::Instruction;
use crate::rotation::domain::{AgentId, TaskRole};

const GOVERNANCE_WARNING_TEMPLATE: &str = "\
# Governance warning: {{ unit_id }}

- **Agent:** {{ agent }} ({{ role }})
- **Evaluated:** {{ timestamp }}
- **Status:** {{ status }}
- **Checks:** {{ passed }} of {{ checks_run }} passed, \
{{ errors }} error(s), {{ warnings }} warning(s)

## Violations
{% for violation in violations %}
- `{{ violation.rule_id }}` ({{ violation.severity }}): \
{{ violation.description }} ({{ violation.detail }})
{%- endfor %}

## Recommendations
{% for recommendation in recommendations %}
- {{ recommendation }}
{%- endfor %}
";

/// Outcome of evaluating a batch of instructions.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    reports: Vec<ComplianceReport>,
}

impl BatchOutcome {
    /// Every report produced, in input order.
    #[must_use]
    pub fn reports(&self) -> &[ComplianceReport] {
        &self.reports
    }

    /// Returns `true` when every report in the batch is fully compliant.
    #[must_use]
    pub fn all_compliant(&self) -> bool {
        self.reports
            .iter()
            .all(|report| report.overall_status == OverallStatus::Compliant)
    }

    /// Reports that need operator attention.
    #[must_use]
    pub fn actionable(&self) -> Vec<&ComplianceReport> {
        self.reports
            .iter()
            .filter(|report| report.is_actionable())
            .collect()
    }

    /// Consumes the outcome, yielding the reports.
    #[must_use]
    pub fn into_reports(self) -> Vec<ComplianceReport> {
        self.reports
    }
}

/// Evaluates instructions against the governance rule set.
pub struct ComplianceValidator<R, A, C>
where
    R: ReferenceLookup,
    A: ArtifactSink,
    C: Clock + Send + Sync,
{
    rules: RuleSet,
    reference: Arc<R>,
    artifacts: Arc<A>,
    clock: Arc<C>,
}

impl<R, A, C> ComplianceValidator<R, A, C>
where
    R: ReferenceLookup,
    A: ArtifactSink,
    C: Clock + Send + Sync,
{
    /// Creates a validator over a compiled rule set and its collaborators.
    #[must_use]
    pub const fn new(rules: RuleSet, reference: Arc<R>, artifacts: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            rules,
            reference,
            artifacts,
            clock,
        }
    }

    /// The rule set this validator evaluates against.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluates one instruction for one role and returns a fresh report.
    ///
    /// `checks_run` always equals the number of rules applicable to the
    /// role; every rule is evaluated even after a violation is found.
    #[must_use]
    pub async fn evaluate(&self, instruction: &Instruction, role: TaskRole) -> ComplianceReport {
        let assignment = instruction.context().role_assignment();
        let agent = assignment.agent_for(role);
        let task_text = instruction.task_text();

        let mut checks_run = 0;
        let mut violations = Vec::new();
        for compiled in self.rules.applicable(role) {
            checks_run += 1;
            if compiled.rule().rule_id == ONBOARDING_RULE_ID {
                self.check_onboarding(compiled, agent, &mut violations).await;
            } else {
                Self::check_patterns(compiled, &task_text, &mut violations);
            }
        }

        let recommendations = recommendations_for(&violations, &self.rules, role);
        let report = ComplianceReport::aggregate(
            ReportSubject {
                unit_id: instruction.context().unit_id().clone(),
                agent,
                role,
            },
            self.clock.utc(),
            checks_run,
            violations,
            recommendations,
        );
        if report.is_actionable() {
            tracing::warn!(
                unit_id = %report.unit_id,
                agent = %report.agent,
                status = %report.overall_status,
                errors = report.errors,
                warnings = report.warnings,
                "instruction is not fully compliant"
            );
        } else {
            tracing::info!(
                unit_id = %report.unit_id,
                agent = %report.agent,
                checks_run = report.checks_run,
                "instruction passed compliance evaluation"
            );
        }
        report
    }

    /// Evaluates a batch of instructions concurrently.
    ///
    /// Reports come back in input order regardless of completion order.
    #[must_use]
    pub async fn evaluate_all(&self, batch: &[(Instruction, TaskRole)]) -> BatchOutcome {
        let reports = join_all(
            batch
                .iter()
                .map(|(instruction, role)| self.evaluate(instruction, *role)),
        )
        .await;
        BatchOutcome { reports }
    }

    /// Persists a report and, for any non-compliant unit, the rendered
    /// governance warning.
    ///
    /// Warnings-only reports still dispatch, but the warning artifact is
    /// written so operators see the open findings. Fully compliant reports
    /// produce no governance entry.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] when rendering or persistence fails.
    pub async fn record_verdict(&self, report: &ComplianceReport) -> ArtifactResult<()> {
        self.artifacts.record_report(report).await?;
        if report.is_actionable() {
            let markdown = render_governance_warning(report)?;
            self.artifacts
                .record_governance_warning(&report.unit_id, &markdown)
                .await?;
        }
        Ok(())
    }

    async fn check_onboarding(
        &self,
        compiled: &CompiledRule,
        agent: AgentId,
        violations: &mut Vec<Violation>,
    ) {
        let rule = compiled.rule();
        match self.reference.onboarding_reference(agent).await {
            Ok(Some(_)) => {}
            Ok(None) => violations.push(Violation::new(
                rule.rule_id.clone(),
                rule.severity,
                "onboarding document missing",
                format!("no onboarding reference found for {agent}"),
            )),
            Err(err) => violations.push(Violation::new(
                rule.rule_id.clone(),
                rule.severity,
                "onboarding lookup failed",
                err.to_string(),
            )),
        }
    }

    fn check_patterns(compiled: &CompiledRule, task_text: &str, violations: &mut Vec<Violation>) {
        let rule = compiled.rule();
        for pattern in compiled.missing_required(task_text) {
            violations.push(Violation::new(
                rule.rule_id.clone(),
                rule.severity,
                "required content missing",
                pattern,
            ));
        }
        for pattern in compiled.matched_forbidden(task_text) {
            violations.push(Violation::new(
                rule.rule_id.clone(),
                rule.severity,
                "forbidden content present",
                pattern,
            ));
        }
    }
}

/// Remediation guidance: one entry per violated rule, in rule-set order.
fn recommendations_for(
    violations: &[Violation],
    rules: &RuleSet,
    role: TaskRole,
) -> Vec<String> {
    rules
        .applicable(role)
        .filter(|compiled| {
            violations
                .iter()
                .any(|violation| violation.rule_id == compiled.rule().rule_id)
        })
        .map(|compiled| compiled.rule().description.clone())
        .collect()
}

/// Renders the operator-facing markdown for a blocked unit.
///
/// # Errors
///
/// Returns [`ArtifactError::Render`] when the template fails to render.
pub fn render_governance_warning(report: &ComplianceReport) -> Result<String, ArtifactError> {
    let environment = Environment::new();
    let context = serde_json::json!({
        "unit_id": report.unit_id.as_str(),
        "agent": report.agent.as_str(),
        "role": report.role.to_string(),
        "timestamp": report.timestamp.to_rfc3339(),
        "status": report.overall_status.as_str(),
        "checks_run": report.checks_run,
        "passed": report.passed,
        "errors": report.errors,
        "warnings": report.warnings,
        "violations": report.violations,
        "recommendations": report.recommendations,
    });
    environment
        .render_str(GOVERNANCE_WARNING_TEMPLATE, context)
        .map_err(|err| ArtifactError::Render(err.to_string()))
}
