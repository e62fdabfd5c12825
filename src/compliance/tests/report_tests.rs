//! Report assembly tests: dominance, counts, serialization.

use chrono::Utc;
use rstest::rstest;

use crate::compliance::domain::{
    ComplianceReport, OverallStatus, ReportSubject, Severity, Violation,
};
use crate::rotation::domain::{AgentId, TaskRole, UnitId};

fn subject() -> ReportSubject {
    ReportSubject {
        unit_id: UnitId::new("step-1").expect("valid unit id"),
        agent: AgentId::Claude,
        role: TaskRole::Coder,
    }
}

fn violation(rule_id: &str, severity: Severity) -> Violation {
    Violation::new(rule_id, severity, "test violation", "detail")
}

#[rstest]
#[case::clean(vec![], OverallStatus::Compliant)]
#[case::warnings_only(
    vec![violation("W1", Severity::Warning), violation("W2", Severity::Warning)],
    OverallStatus::Warnings
)]
#[case::error_dominates(
    vec![violation("W1", Severity::Warning), violation("E1", Severity::Error)],
    OverallStatus::Violations
)]
fn one_error_dominates_any_number_of_warnings(
    #[case] violations: Vec<Violation>,
    #[case] expected: OverallStatus,
) {
    assert_eq!(OverallStatus::from_violations(&violations), expected);
}

#[rstest]
fn aggregate_counts_distinct_violated_rules() {
    // Two violations of the same rule consume a single pass slot.
    let violations = vec![
        violation("E1", Severity::Error),
        violation("E1", Severity::Error),
        violation("W1", Severity::Warning),
    ];
    let report = ComplianceReport::aggregate(subject(), Utc::now(), 6, violations, vec![]);

    assert_eq!(report.checks_run, 6);
    assert_eq!(report.passed, 4);
    assert_eq!(report.errors, 2);
    assert_eq!(report.warnings, 1);
    assert_eq!(report.overall_status, OverallStatus::Violations);
}

#[rstest]
fn dispatch_is_blocked_only_by_errors() {
    let warned = ComplianceReport::aggregate(
        subject(),
        Utc::now(),
        5,
        vec![violation("W1", Severity::Warning)],
        vec![],
    );
    let blocked = ComplianceReport::aggregate(
        subject(),
        Utc::now(),
        5,
        vec![violation("E1", Severity::Error)],
        vec![],
    );

    assert!(warned.allows_dispatch());
    assert!(warned.is_actionable());
    assert!(!blocked.allows_dispatch());
    assert!(blocked.is_actionable());
}

#[rstest]
fn compliant_report_is_not_actionable() {
    let report = ComplianceReport::aggregate(subject(), Utc::now(), 6, vec![], vec![]);
    assert_eq!(report.passed, 6);
    assert!(report.allows_dispatch());
    assert!(!report.is_actionable());
}

#[rstest]
fn report_round_trips_through_json() {
    let report = ComplianceReport::aggregate(
        subject(),
        Utc::now(),
        6,
        vec![violation("E1", Severity::Error)],
        vec!["fix E1".to_owned()],
    );

    let json = serde_json::to_string(&report).expect("serialize report");
    let restored: ComplianceReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(restored, report);
}
