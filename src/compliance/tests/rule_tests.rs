//! Rule-set tests: compilation, configuration errors, role filtering.

use rstest::rstest;

use crate::compliance::{
    domain::{ComplianceRule, ONBOARDING_RULE_ID, RoleApplicability, RuleSet, Severity, builtin_rules},
    error::ConfigurationError,
};
use crate::rotation::domain::TaskRole;

fn pattern_rule(rule_id: &str, required: &[&str], forbidden: &[&str]) -> ComplianceRule {
    ComplianceRule {
        rule_id: rule_id.to_owned(),
        description: format!("test rule {rule_id}"),
        severity: Severity::Error,
        required_patterns: required.iter().map(|p| (*p).to_owned()).collect(),
        forbidden_patterns: forbidden.iter().map(|p| (*p).to_owned()).collect(),
        applicable_roles: RoleApplicability::Both,
    }
}

#[rstest]
fn builtin_rule_set_compiles() {
    let rules = RuleSet::builtin().expect("builtin rules compile");
    assert_eq!(rules.len(), builtin_rules().len());
    assert!(!rules.is_empty());
}

#[rstest]
fn builtin_onboarding_rule_carries_no_patterns() {
    let onboarding = builtin_rules()
        .into_iter()
        .find(|rule| rule.rule_id == ONBOARDING_RULE_ID)
        .expect("onboarding rule present");
    assert!(onboarding.required_patterns.is_empty());
    assert!(onboarding.forbidden_patterns.is_empty());
    assert_eq!(onboarding.severity, Severity::Error);
}

#[rstest]
fn rule_set_round_trips_through_json() {
    let json = serde_json::to_string(&builtin_rules()).expect("serialize rules");
    let parsed = RuleSet::from_json(&json).expect("parse rules");
    assert_eq!(parsed.len(), builtin_rules().len());
}

#[rstest]
fn malformed_pattern_is_a_configuration_error() {
    let result = RuleSet::new(vec![pattern_rule("BROKEN", &["(unclosed"], &[])]);
    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidPattern { rule_id, .. }) if rule_id == "BROKEN"
    ));
}

#[rstest]
fn duplicate_rule_id_is_rejected() {
    let result = RuleSet::new(vec![
        pattern_rule("SAME", &["a"], &[]),
        pattern_rule("SAME", &["b"], &[]),
    ]);
    assert!(matches!(
        result,
        Err(ConfigurationError::DuplicateRuleId(id)) if id == "SAME"
    ));
}

#[rstest]
fn blank_rule_id_is_rejected() {
    let result = RuleSet::new(vec![pattern_rule("   ", &[], &[])]);
    assert!(matches!(result, Err(ConfigurationError::EmptyRuleId)));
}

#[rstest]
fn malformed_json_is_a_parse_error() {
    let result = RuleSet::from_json("not json");
    assert!(matches!(result, Err(ConfigurationError::Parse(_))));
}

#[rstest]
#[case::coder(TaskRole::Coder, 6)]
#[case::tester(TaskRole::Tester, 5)]
fn applicable_rules_filter_by_role(#[case] role: TaskRole, #[case] expected: usize) {
    let rules = RuleSet::builtin().expect("builtin rules compile");
    assert_eq!(rules.applicable(role).count(), expected);
}

#[rstest]
#[case::both_to_coder(RoleApplicability::Both, TaskRole::Coder, true)]
#[case::both_to_tester(RoleApplicability::Both, TaskRole::Tester, true)]
#[case::coder_to_tester(RoleApplicability::Coder, TaskRole::Tester, false)]
#[case::tester_to_tester(RoleApplicability::Tester, TaskRole::Tester, true)]
fn role_applicability_matrix(
    #[case] applicability: RoleApplicability,
    #[case] role: TaskRole,
    #[case] expected: bool,
) {
    assert_eq!(applicability.applies_to(role), expected);
}

#[rstest]
fn compiled_rule_reports_missing_and_matched_patterns() {
    let rules = RuleSet::new(vec![pattern_rule(
        "MIXED",
        &[r"(?i)manual reference"],
        &[r"(?i)rm\s+-rf"],
    )])
    .expect("rule compiles");
    let compiled = rules
        .applicable(TaskRole::Coder)
        .next()
        .expect("one rule applies");

    assert_eq!(
        compiled.missing_required("run rm -rf somewhere"),
        vec![r"(?i)manual reference"]
    );
    assert_eq!(
        compiled.matched_forbidden("run rm -rf somewhere"),
        vec![r"(?i)rm\s+-rf"]
    );
    assert!(compiled.missing_required("see Manual Reference 4.2").is_empty());
    assert!(compiled.matched_forbidden("see Manual Reference 4.2").is_empty());
}
