//! Tests for the validator checks.

use fmd_testing::{all_columns, render_csv, MatchRow};

use crate::config::ValidationConfig;
use crate::dataset::{ColumnKind, Table};

use super::{validate_table, CheckKind, RowShape, ValidationReport, Violation};

fn played(match_id: i64, home: i64, away: i64) -> MatchRow {
    MatchRow::played(match_id, home, away)
}

fn unplayed(match_id: i64) -> MatchRow {
    MatchRow::unplayed(match_id)
}

fn table_with(columns: &[&str], rows: &[MatchRow]) -> Table {
    Table::from_reader(render_csv(columns, rows).as_bytes()).unwrap()
}

fn run(rows: &[MatchRow]) -> ValidationReport {
    validate_table(&table_with(&all_columns(), rows), &ValidationConfig::default())
}

#[test]
fn clean_dataset_passes() {
    let report = run(&[played(1, 2, 1), played(2, 1, 1), played(3, 0, 3), unplayed(4)]);
    assert!(report.passed(), "{}", report.render());
    assert_eq!(report.rows_checked, 4);
    assert_eq!(report.checks.len(), 5);
    assert_eq!(report.violation_count(), 0);
}

#[test]
fn columns_in_any_order() {
    let mut columns = all_columns();
    columns.reverse();
    let table = table_with(&columns, &[played(1, 2, 1)]);
    let report = validate_table(&table, &ValidationConfig::default());
    assert!(report.passed(), "{}", report.render());
}

#[test]
fn home_win_row_with_wrong_goal_difference() {
    let mut row = played(123, 2, 1);
    row.set("goal_difference", "2");
    let report = run(&[row]);
    assert!(!report.passed());
    assert_eq!(
        report.violations(CheckKind::Derived),
        &[Violation::DerivedMismatch {
            line: 2,
            match_id: Some(123),
            field: "goal_difference",
            expected: "1".into(),
            actual: "2".into(),
        }]
    );
}

#[test]
fn draw_stored_as_home_win() {
    let mut row = played(9, 1, 1);
    row.set("match_outcome", "Home Win");
    row.set("home_points", "3");
    row.set("away_points", "0");
    let report = run(&[row]);
    let fields: Vec<&str> = report
        .violations(CheckKind::Derived)
        .iter()
        .map(|v| match v {
            Violation::DerivedMismatch { field, .. } => *field,
            other => panic!("unexpected {other}"),
        })
        .collect();
    assert_eq!(fields, vec!["match_outcome", "home_points", "away_points"]);
}

#[test]
fn empty_derived_cell_on_played_match() {
    let mut row = played(10, 3, 0);
    row.set("total_goals", "");
    let report = run(&[row]);
    match report.violations(CheckKind::Derived) {
        [Violation::DerivedMismatch { field, actual, .. }] => {
            assert_eq!(*field, "total_goals");
            assert_eq!(actual, "<empty>");
        }
        other => panic!("expected one mismatch, got {other:?}"),
    }
}

#[test]
fn snake_case_outcome_is_accepted() {
    let mut row = played(11, 0, 2);
    row.set("match_outcome", "away_win");
    assert!(run(&[row]).passed());
}

#[test]
fn duplicate_match_id_reported_once() {
    let report = run(&[played(55, 1, 0), played(56, 0, 0), played(55, 2, 2)]);
    assert!(!report.passed());
    assert_eq!(
        report.violations(CheckKind::Uniqueness),
        &[Violation::DuplicateKey {
            match_id: 55,
            lines: vec![2, 4],
        }]
    );
    assert_eq!(report.violation_count(), 1);
}

#[test]
fn schema_lists_missing_and_unexpected() {
    let mut columns: Vec<&str> = all_columns()
        .into_iter()
        .filter(|c| *c != "referee")
        .collect();
    columns.push("attendance");
    let table = table_with(&columns, &[played(1, 2, 1)]);
    let report = validate_table(&table, &ValidationConfig::default());
    assert_eq!(
        report.violations(CheckKind::Schema),
        &[Violation::Schema {
            missing: vec!["referee".into()],
            unexpected: vec!["attendance".into()],
        }]
    );
    // Later checks still ran on what is there.
    assert!(report.violations(CheckKind::Derived).is_empty());
    assert!(report.violations(CheckKind::Type).is_empty());
}

#[test]
fn duplicate_header_is_unexpected() {
    let mut columns = all_columns();
    columns.push("season");
    let table = table_with(&columns, &[played(1, 2, 1)]);
    let report = validate_table(&table, &ValidationConfig::default());
    assert_eq!(
        report.violations(CheckKind::Schema),
        &[Violation::Schema {
            missing: vec![],
            unexpected: vec!["season".into()],
        }]
    );
}

#[test]
fn type_errors_are_all_collected() {
    let mut a = played(1, 2, 1);
    a.set("matchday", "one");
    let mut b = played(2, 1, 0);
    b.set("date_utc", "16/08/2024");
    b.set("home_team", "");
    let report = run(&[a, b]);
    let types = report.violations(CheckKind::Type);
    assert_eq!(types.len(), 3);
    assert!(types.contains(&Violation::Type {
        line: 2,
        column: "matchday".into(),
        value: "one".into(),
        expected: ColumnKind::Integer,
    }));
    assert!(types.contains(&Violation::Type {
        line: 3,
        column: "date_utc".into(),
        value: "16/08/2024".into(),
        expected: ColumnKind::Timestamp,
    }));
    assert!(types.contains(&Violation::Type {
        line: 3,
        column: "home_team".into(),
        value: String::new(),
        expected: ColumnKind::Text,
    }));
}

#[test]
fn float_score_reported_once() {
    let mut row = played(5, 2, 1);
    row.set("fulltime_home", "2.0");
    let report = run(&[row]);
    assert_eq!(report.violations(CheckKind::Type).len(), 1);
    assert!(report.violations(CheckKind::Derived).is_empty());
    assert!(report.violations(CheckKind::Referential).is_empty());
}

#[test]
fn missing_match_id_is_a_type_error() {
    let mut row = played(5, 2, 1);
    row.set("match_id", "");
    let report = run(&[row]);
    assert_eq!(report.violations(CheckKind::Type).len(), 1);
    assert!(report.violations(CheckKind::Uniqueness).is_empty());
}

#[test]
fn ragged_row_is_reported() {
    let mut csv = all_columns().join(",");
    csv.push_str("\nPL,Premier League,2024\n");
    let table = Table::from_reader(csv.as_bytes()).unwrap();
    let report = validate_table(&table, &ValidationConfig::default());
    assert!(report
        .violations(CheckKind::Type)
        .contains(&Violation::RowShape(RowShape {
            line: 2,
            expected: 23,
            found: 3,
        })));
}

#[test]
fn unplayed_match_is_exempt() {
    let report = run(&[unplayed(70)]);
    assert!(report.passed(), "{}", report.render());
}

#[test]
fn finished_match_without_score() {
    let mut row = unplayed(71);
    row.set("status", "FINISHED");
    let report = run(&[row]);
    match report.violations(CheckKind::Referential) {
        [Violation::Referential { reason, match_id, .. }] => {
            assert_eq!(*match_id, Some(71));
            assert!(reason.contains("fulltime score is missing"), "{reason}");
        }
        other => panic!("expected one referential violation, got {other:?}"),
    }
}

#[test]
fn completed_statuses_are_configurable() {
    let mut row = unplayed(72);
    row.set("status", "AWARDED");
    let cfg = ValidationConfig {
        completed_statuses: vec!["FINISHED".into()],
    };
    let report = validate_table(&table_with(&all_columns(), &[row]), &cfg);
    assert!(report.passed(), "{}", report.render());
}

#[test]
fn half_a_fulltime_score() {
    let mut row = unplayed(73);
    row.set("fulltime_home", "1");
    let report = run(&[row]);
    assert_eq!(report.violations(CheckKind::Referential).len(), 1);
    assert!(report.violations(CheckKind::Derived).is_empty());
}

#[test]
fn oversized_scores_are_out_of_range() {
    let mut row = played(90, 1, 0);
    row.set("fulltime_home", i64::MAX.to_string());
    row.set("fulltime_away", "1");
    let report = run(&[row]);
    assert!(!report.passed());
    assert!(report.violations(CheckKind::Type).is_empty());
    assert!(report.violations(CheckKind::Derived).is_empty());
    match report.violations(CheckKind::Referential) {
        [Violation::Referential { reason, match_id, .. }] => {
            assert_eq!(*match_id, Some(90));
            assert_eq!(reason, &format!("fulltime score {}-1 is out of range", i64::MAX));
        }
        other => panic!("expected one referential violation, got {other:?}"),
    }

    // Large but representable: derived fields are still checked.
    let mut row = played(91, 1, 0);
    row.set("fulltime_home", i64::MAX.to_string());
    let report = run(&[row]);
    assert!(report.violations(CheckKind::Referential).is_empty());
    assert!(!report.violations(CheckKind::Derived).is_empty());
}

#[test]
fn same_team_on_both_sides() {
    let mut row = played(80, 1, 0);
    row.set("away_team_id", "57");
    let report = run(&[row]);
    match report.violations(CheckKind::Referential) {
        [Violation::Referential { reason, .. }] => {
            assert_eq!(reason, "home_team_id equals away_team_id (57)");
        }
        other => panic!("expected one referential violation, got {other:?}"),
    }
}

#[test]
fn negative_scores() {
    let mut row = played(81, 0, 1);
    row.set("halftime_away", "-1");
    let report = run(&[row]);
    assert_eq!(report.violations(CheckKind::Referential).len(), 1);

    // Negative fulltime score: derived fields consistent, still flagged.
    let report = run(&[played(82, -1, 0)]);
    let reasons: Vec<String> = report
        .violations(CheckKind::Referential)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(reasons.iter().any(|r| r.contains("fulltime_home is negative (-1)")));
    assert!(reasons.iter().any(|r| r.contains("total_goals is negative (-1)")));
}

#[test]
fn render_summary() {
    let report = run(&[played(55, 1, 0), played(55, 1, 0)]);
    let text = report.render();
    assert!(text.contains("ok   Schema"), "{text}");
    assert!(text.contains("FAIL Primary key: 1 issue(s)"), "{text}");
    assert!(text.contains("DuplicateKeyError: match_id 55"), "{text}");
    assert!(text.ends_with("Validation failed with 1 issue(s).\n"), "{text}");

    let ok = run(&[played(1, 0, 0)]).render();
    assert!(ok.ends_with("Dataset validation passed.\n"), "{ok}");
}

#[test]
fn report_serializes_to_json() {
    let report = run(&[played(55, 1, 0), played(55, 1, 0)]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["rows_checked"], 2);
    assert_eq!(json["checks"][2]["check"], "uniqueness");
    assert_eq!(json["checks"][2]["violations"][0]["error"], "DuplicateKeyError");
}
