//! The individual checks. Each returns every violation it finds.

use std::collections::BTreeMap;

use crate::config::ValidationConfig;
use crate::dataset::{
    parse_integer, parse_timestamp, Cell, ColumnKind, MatchOutcome, MatchRecord, Table, COLUMNS,
};

use super::{RowShape, Violation};

/// Missing and unexpected column names, order-insensitive.
pub fn check_schema(table: &Table) -> Vec<Violation> {
    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|c| !table.has_column(c.name))
        .map(|c| c.name.to_string())
        .collect();

    let mut seen = Vec::with_capacity(table.headers.len());
    let mut unexpected = Vec::new();
    for h in &table.headers {
        let known = COLUMNS.iter().any(|c| c.name == h);
        if !known || seen.contains(&h) {
            unexpected.push(h.clone());
        }
        seen.push(h);
    }

    if missing.is_empty() && unexpected.is_empty() {
        Vec::new()
    } else {
        vec![Violation::Schema {
            missing,
            unexpected,
        }]
    }
}

fn conforms(kind: ColumnKind, value: &str) -> bool {
    match kind {
        ColumnKind::Integer => parse_integer(value).is_some(),
        ColumnKind::Text => true,
        ColumnKind::Timestamp => parse_timestamp(value).is_some(),
        ColumnKind::Outcome => MatchOutcome::parse_label(value).is_some(),
    }
}

/// Every cell against its column's kind; also flags ragged rows.
pub fn check_types(table: &Table) -> Vec<Violation> {
    let mut out = Vec::new();
    for row in &table.rows {
        if row.fields.len() != table.headers.len() {
            out.push(Violation::RowShape(RowShape {
                line: row.line,
                expected: table.headers.len(),
                found: row.fields.len(),
            }));
        }
        for spec in COLUMNS.iter() {
            let Some(raw) = table.cell(row, spec.name) else {
                continue;
            };
            let value = raw.trim();
            let ok = if value.is_empty() {
                spec.nullable
            } else {
                conforms(spec.kind, value)
            };
            if !ok {
                out.push(Violation::Type {
                    line: row.line,
                    column: spec.name.to_string(),
                    value: raw.to_string(),
                    expected: spec.kind,
                });
            }
        }
    }
    out
}

/// One violation per repeated match_id, ordered by id.
pub fn check_unique(records: &[MatchRecord]) -> Vec<Violation> {
    let mut by_id: BTreeMap<i64, Vec<u64>> = BTreeMap::new();
    for r in records {
        if let Some(id) = r.match_id.value() {
            by_id.entry(id).or_default().push(r.line);
        }
    }
    by_id
        .into_iter()
        .filter(|(_, lines)| lines.len() > 1)
        .map(|(match_id, lines)| Violation::DuplicateKey { match_id, lines })
        .collect()
}

fn compare<T: Copy + PartialEq + ToString>(
    out: &mut Vec<Violation>,
    record: &MatchRecord,
    field: &'static str,
    stored: Cell<T>,
    expected: T,
) {
    let actual = match stored {
        Cell::Value(v) if v == expected => return,
        Cell::Value(v) => v.to_string(),
        Cell::Empty => "<empty>".to_string(),
        Cell::Unusable => return,
    };
    out.push(Violation::DerivedMismatch {
        line: record.line,
        match_id: record.match_id.value(),
        field,
        expected: expected.to_string(),
        actual,
    });
}

/// Stored derived fields against their recomputation. Rows without a full
/// fulltime score are unplayed and exempt; scores too large to add up are
/// left to the referential check.
pub fn check_derived(records: &[MatchRecord]) -> Vec<Violation> {
    use crate::dataset::columns::{
        AWAY_POINTS, GOAL_DIFFERENCE, HOME_POINTS, MATCH_OUTCOME, TOTAL_GOALS,
    };

    let mut out = Vec::new();
    for r in records {
        let Some(d) = r.derived() else {
            continue;
        };
        compare(&mut out, r, GOAL_DIFFERENCE, r.goal_difference, d.goal_difference);
        compare(&mut out, r, TOTAL_GOALS, r.total_goals, d.total_goals);
        compare(&mut out, r, MATCH_OUTCOME, r.match_outcome, d.outcome);
        compare(&mut out, r, HOME_POINTS, r.home_points, d.home_points);
        compare(&mut out, r, AWAY_POINTS, r.away_points, d.away_points);
    }
    out
}

/// Team identity and score sanity.
pub fn check_referential(records: &[MatchRecord], cfg: &ValidationConfig) -> Vec<Violation> {
    let mut out = Vec::new();
    for r in records {
        let mut flag = |reason: String| {
            out.push(Violation::Referential {
                line: r.line,
                match_id: r.match_id.value(),
                reason,
            })
        };

        if let (Some(home), Some(away)) = (r.home_team_id.value(), r.away_team_id.value()) {
            if home == away {
                flag(format!("home_team_id equals away_team_id ({home})"));
            }
        }

        for (column, cell) in r.score_cells() {
            if let Some(v) = cell.value().filter(|v| *v < 0) {
                flag(format!("{column} is negative ({v})"));
            }
        }

        match (r.fulltime_home, r.fulltime_away) {
            (Cell::Empty, Cell::Empty) => {
                if let Some(status) = r.status.as_deref().filter(|s| cfg.is_completed(s)) {
                    flag(format!("status {status} but fulltime score is missing"));
                }
            }
            (Cell::Empty, Cell::Value(_)) | (Cell::Value(_), Cell::Empty) => {
                flag("only one fulltime score present".to_string());
            }
            (Cell::Value(home), Cell::Value(away)) if r.derived().is_none() => {
                flag(format!("fulltime score {home}-{away} is out of range"));
            }
            _ => {}
        }
    }
    out
}
