//! Declarative compliance rules and the compiled rule set.
//!
//! Rules are data, not code branches: pattern lists plus severity and role
//! applicability, deserializable from JSON so the governance rule set can be
//! versioned and extended without touching the evaluator. Patterns compile
//! once at rule-set construction; a pattern that fails to compile is a
//! configuration error reported at startup, never a per-instruction failure.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::compliance::error::ConfigurationError;
use crate::rotation::domain::TaskRole;

/// Severity attached to a rule and to the violations it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks dispatch.
    Error,
    /// Surfaced to operators; dispatch may proceed.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    /// Returns the severity as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which role's task text a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleApplicability {
    /// Applies only when the acting agent codes.
    Coder,
    /// Applies only when the acting agent tests.
    Tester,
    /// Applies to both roles.
    Both,
}

impl RoleApplicability {
    /// Returns `true` when the rule applies to the given role.
    #[must_use]
    pub const fn applies_to(self, role: TaskRole) -> bool {
        match self {
            Self::Both => true,
            Self::Coder => matches!(role, TaskRole::Coder),
            Self::Tester => matches!(role, TaskRole::Tester),
        }
    }
}

/// A single declarative governance rule.
///
/// # Examples
///
/// ```
/// use tandem::compliance::domain::{ComplianceRule, RoleApplicability, Severity};
///
/// let rule = ComplianceRule {
///     rule_id: "MANUAL_REFERENCE_REQUIRED".to_owned(),
///     description: "Task must cite the operating manual".to_owned(),
///     severity: Severity::Error,
///     required_patterns: vec![r"(?i)manual[- ]reference".to_owned()],
///     forbidden_patterns: vec![],
///     applicable_roles: RoleApplicability::Both,
/// };
/// assert_eq!(rule.severity, Severity::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRule {
    /// Stable identifier referenced by violations and reports.
    pub rule_id: String,
    /// What the rule enforces, phrased for remediation guidance.
    pub description: String,
    /// Severity of any violation of this rule.
    pub severity: Severity,
    /// Patterns whose absence from the task text is a violation.
    #[serde(default)]
    pub required_patterns: Vec<String>,
    /// Patterns whose presence in the task text is a violation.
    #[serde(default)]
    pub forbidden_patterns: Vec<String>,
    /// The role or roles the rule applies to.
    pub applicable_roles: RoleApplicability,
}

/// Rule id of the built-in onboarding check.
///
/// This rule carries no patterns; the validator satisfies it by resolving
/// the acting agent's onboarding document through the reference lookup port.
pub const ONBOARDING_RULE_ID: &str = "AGENT_ONBOARDING_PRESENT";

/// A rule with its patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: ComplianceRule,
    required: Vec<Regex>,
    forbidden: Vec<Regex>,
}

impl CompiledRule {
    fn compile(rule: ComplianceRule) -> Result<Self, ConfigurationError> {
        let compile_all = |patterns: &[String]| -> Result<Vec<Regex>, ConfigurationError> {
            patterns
                .iter()
                .map(|pattern| {
                    Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
                        rule_id: rule.rule_id.clone(),
                        pattern: pattern.clone(),
                        reason: source.to_string(),
                    })
                })
                .collect()
        };
        let required = compile_all(&rule.required_patterns)?;
        let forbidden = compile_all(&rule.forbidden_patterns)?;
        Ok(Self {
            rule,
            required,
            forbidden,
        })
    }

    /// The declarative rule this compiles.
    #[must_use]
    pub const fn rule(&self) -> &ComplianceRule {
        &self.rule
    }

    /// Required patterns absent from the text.
    #[must_use]
    pub fn missing_required(&self, text: &str) -> Vec<&str> {
        self.required
            .iter()
            .filter(|regex| !regex.is_match(text))
            .map(Regex::as_str)
            .collect()
    }

    /// Forbidden patterns present in the text.
    #[must_use]
    pub fn matched_forbidden(&self, text: &str) -> Vec<&str> {
        self.forbidden
            .iter()
            .filter(|regex| regex.is_match(text))
            .map(Regex::as_str)
            .collect()
    }
}

/// An immutable, validated set of compiled rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compiles a rule set from declarative rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for an unparsable pattern, an empty or
    /// duplicate rule id. Configuration problems fail fast here, at startup.
    pub fn new(rules: Vec<ComplianceRule>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.rule_id.trim().is_empty() {
                return Err(ConfigurationError::EmptyRuleId);
            }
            if !seen.insert(rule.rule_id.clone()) {
                return Err(ConfigurationError::DuplicateRuleId(rule.rule_id.clone()));
            }
        }
        let compiled = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules: compiled })
    }

    /// Parses and compiles a rule set from a JSON array of rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Parse`] for malformed JSON and the same
    /// compilation errors as [`RuleSet::new`].
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let rules: Vec<ComplianceRule> =
            serde_json::from_str(json).map_err(|err| ConfigurationError::Parse(err.to_string()))?;
        Self::new(rules)
    }

    /// The governance rule set shipped with the platform.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] only if a built-in pattern fails to
    /// compile, which the rule-set tests rule out.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::new(builtin_rules())
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules applicable to the given role.
    pub fn applicable(&self, role: TaskRole) -> impl Iterator<Item = &CompiledRule> {
        self.rules
            .iter()
            .filter(move |compiled| compiled.rule().applicable_roles.applies_to(role))
    }
}

fn rule(
    rule_id: &str,
    description: &str,
    severity: Severity,
    required: &[&str],
    forbidden: &[&str],
    applicable_roles: RoleApplicability,
) -> ComplianceRule {
    ComplianceRule {
        rule_id: rule_id.to_owned(),
        description: description.to_owned(),
        severity,
        required_patterns: required.iter().map(|p| (*p).to_owned()).collect(),
        forbidden_patterns: forbidden.iter().map(|p| (*p).to_owned()).collect(),
        applicable_roles,
    }
}

/// The built-in governance rules, as declarative data.
#[must_use]
pub fn builtin_rules() -> Vec<ComplianceRule> {
    vec![
        rule(
            "MANUAL_REFERENCE_REQUIRED",
            "Task must cite the operating manual reference for its step",
            Severity::Error,
            &[r"(?i)manual[- ]reference"],
            &[],
            RoleApplicability::Both,
        ),
        rule(
            ONBOARDING_RULE_ID,
            "Acting agent must have an onboarding reference document",
            Severity::Error,
            &[],
            &[],
            RoleApplicability::Both,
        ),
        rule(
            "STEP_ANCHOR_CITED",
            "Coder task must cite the step anchor it implements against",
            Severity::Error,
            &[r"(?i)step[- ]anchor"],
            &[],
            RoleApplicability::Coder,
        ),
        rule(
            "TEST_EVIDENCE_REQUIRED",
            "Tester task should name the evidence it will capture",
            Severity::Warning,
            &[r"(?i)screenshot|test evidence|assertion"],
            &[],
            RoleApplicability::Tester,
        ),
        rule(
            "GOVERNANCE_LOG_ENTRY",
            "Task should reference its governance log entry",
            Severity::Warning,
            &[r"(?i)governance log"],
            &[],
            RoleApplicability::Both,
        ),
        rule(
            "NO_CREDENTIAL_LOGGING",
            "Task must not instruct writing credential material to logs",
            Severity::Error,
            &[],
            &[
                r"(?i)log\s+(the\s+)?(password|secret|api[_-]?key|token)",
                r"(?i)(password|secret|api[_-]?key|token)\s*[:=]\s*\S+",
            ],
            RoleApplicability::Both,
        ),
        rule(
            "NO_DESTRUCTIVE_SHORTCUTS",
            "Coder task must not include destructive shortcuts",
            Severity::Error,
            &[],
            &[r"(?i)drop\s+table", r"(?i)rm\s+-rf", r"(?i)force[- ]push"],
            RoleApplicability::Coder,
        ),
    ]
}
