//! Typed match rows and the derived-field rules (3-1-0 scoring).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::columns::*;
use super::{Row, Table};

/// Result of a match from a neutral perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    pub fn from_scores(home: i64, away: i64) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// (home, away) points under 3-1-0 scoring.
    pub fn points(self) -> (i64, i64) {
        match self {
            MatchOutcome::HomeWin => (3, 0),
            MatchOutcome::Draw => (1, 1),
            MatchOutcome::AwayWin => (0, 3),
        }
    }

    /// Label as published in the dataset.
    pub fn label(self) -> &'static str {
        match self {
            MatchOutcome::HomeWin => "Home Win",
            MatchOutcome::Draw => "Draw",
            MatchOutcome::AwayWin => "Away Win",
        }
    }

    /// Accepts `Home Win`, `home_win`, `HOME-WIN` and friends.
    pub fn parse_label(s: &str) -> Option<Self> {
        let norm: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match norm.as_str() {
            "home_win" => Some(MatchOutcome::HomeWin),
            "draw" => Some(MatchOutcome::Draw),
            "away_win" => Some(MatchOutcome::AwayWin),
            _ => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Columns that are a pure function of the fulltime score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derived {
    pub goal_difference: i64,
    pub total_goals: i64,
    pub outcome: MatchOutcome,
    pub home_points: i64,
    pub away_points: i64,
}

impl Derived {
    /// None when the difference or the sum does not fit in an `i64`.
    pub fn from_fulltime(home: i64, away: i64) -> Option<Self> {
        let outcome = MatchOutcome::from_scores(home, away);
        let (home_points, away_points) = outcome.points();
        Some(Self {
            goal_difference: home.checked_sub(away)?,
            total_goals: home.checked_add(away)?,
            outcome,
            home_points,
            away_points,
        })
    }
}

/// A typed cell. `Unusable` covers absent columns and values that failed their
/// type; both are reported by earlier checks and skipped by later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<T> {
    Empty,
    Unusable,
    Value(T),
}

impl<T: Copy> Cell<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Cell::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

fn typed<T>(raw: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Cell<T> {
    match raw.map(str::trim) {
        None => Cell::Unusable,
        Some("") => Cell::Empty,
        Some(s) => parse(s).map_or(Cell::Unusable, Cell::Value),
    }
}

/// Strict base-10 integer; `2.0` is rejected.
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS+HH:MM`, naive datetimes (taken as
/// UTC) and bare dates.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The fields of a row that the semantic checks look at.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub line: u64,
    pub match_id: Cell<i64>,
    pub status: Option<String>,
    pub home_team_id: Cell<i64>,
    pub away_team_id: Cell<i64>,
    pub fulltime_home: Cell<i64>,
    pub fulltime_away: Cell<i64>,
    pub halftime_home: Cell<i64>,
    pub halftime_away: Cell<i64>,
    pub goal_difference: Cell<i64>,
    pub total_goals: Cell<i64>,
    pub match_outcome: Cell<MatchOutcome>,
    pub home_points: Cell<i64>,
    pub away_points: Cell<i64>,
}

impl MatchRecord {
    pub fn from_row(table: &Table, row: &Row) -> Self {
        let int = |name: &str| typed(table.cell(row, name), parse_integer);
        Self {
            line: row.line,
            match_id: int(MATCH_ID),
            status: table
                .cell(row, STATUS)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            home_team_id: int(HOME_TEAM_ID),
            away_team_id: int(AWAY_TEAM_ID),
            fulltime_home: int(FULLTIME_HOME),
            fulltime_away: int(FULLTIME_AWAY),
            halftime_home: int(HALFTIME_HOME),
            halftime_away: int(HALFTIME_AWAY),
            goal_difference: int(GOAL_DIFFERENCE),
            total_goals: int(TOTAL_GOALS),
            match_outcome: typed(table.cell(row, MATCH_OUTCOME), MatchOutcome::parse_label),
            home_points: int(HOME_POINTS),
            away_points: int(AWAY_POINTS),
        }
    }

    /// Recomputed derived fields, when both fulltime scores are known and
    /// their sum and difference are representable.
    pub fn derived(&self) -> Option<Derived> {
        let home = self.fulltime_home.value()?;
        let away = self.fulltime_away.value()?;
        Derived::from_fulltime(home, away)
    }

    /// Score cells that must never be negative.
    pub fn score_cells(&self) -> [(&'static str, Cell<i64>); 5] {
        [
            (FULLTIME_HOME, self.fulltime_home),
            (FULLTIME_AWAY, self.fulltime_away),
            (HALFTIME_HOME, self.halftime_home),
            (HALFTIME_AWAY, self.halftime_away),
            (TOTAL_GOALS, self.total_goals),
        ]
    }
}
