//! The 23-column match schema.

use serde::Serialize;
use std::fmt;

/// Semantic type of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Text,
    Timestamp,
    Outcome,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "string",
            ColumnKind::Timestamp => "UTC timestamp",
            ColumnKind::Outcome => "match outcome",
        };
        f.write_str(s)
    }
}

/// One expected column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Whether an empty cell is acceptable (unplayed matches, unknown referee).
    pub nullable: bool,
}

const fn col(name: &'static str, kind: ColumnKind, nullable: bool) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        nullable,
    }
}

pub const COMPETITION_CODE: &str = "competition_code";
pub const COMPETITION_NAME: &str = "competition_name";
pub const SEASON: &str = "season";
pub const MATCH_ID: &str = "match_id";
pub const MATCHDAY: &str = "matchday";
pub const STAGE: &str = "stage";
pub const STATUS: &str = "status";
pub const DATE_UTC: &str = "date_utc";
pub const REFEREE: &str = "referee";
pub const REFEREE_ID: &str = "referee_id";
pub const HOME_TEAM_ID: &str = "home_team_id";
pub const HOME_TEAM: &str = "home_team";
pub const AWAY_TEAM_ID: &str = "away_team_id";
pub const AWAY_TEAM: &str = "away_team";
pub const FULLTIME_HOME: &str = "fulltime_home";
pub const FULLTIME_AWAY: &str = "fulltime_away";
pub const HALFTIME_HOME: &str = "halftime_home";
pub const HALFTIME_AWAY: &str = "halftime_away";
pub const GOAL_DIFFERENCE: &str = "goal_difference";
pub const TOTAL_GOALS: &str = "total_goals";
pub const MATCH_OUTCOME: &str = "match_outcome";
pub const HOME_POINTS: &str = "home_points";
pub const AWAY_POINTS: &str = "away_points";

/// Expected columns in published order. Files may order them differently.
pub const COLUMNS: [ColumnSpec; 23] = [
    col(COMPETITION_CODE, ColumnKind::Text, false),
    col(COMPETITION_NAME, ColumnKind::Text, false),
    col(SEASON, ColumnKind::Text, false),
    col(MATCH_ID, ColumnKind::Integer, false),
    col(MATCHDAY, ColumnKind::Integer, false),
    col(STAGE, ColumnKind::Text, false),
    col(STATUS, ColumnKind::Text, false),
    col(DATE_UTC, ColumnKind::Timestamp, false),
    col(REFEREE, ColumnKind::Text, true),
    col(REFEREE_ID, ColumnKind::Integer, true),
    col(HOME_TEAM_ID, ColumnKind::Integer, false),
    col(HOME_TEAM, ColumnKind::Text, false),
    col(AWAY_TEAM_ID, ColumnKind::Integer, false),
    col(AWAY_TEAM, ColumnKind::Text, false),
    col(FULLTIME_HOME, ColumnKind::Integer, true),
    col(FULLTIME_AWAY, ColumnKind::Integer, true),
    col(HALFTIME_HOME, ColumnKind::Integer, true),
    col(HALFTIME_AWAY, ColumnKind::Integer, true),
    col(GOAL_DIFFERENCE, ColumnKind::Integer, true),
    col(TOTAL_GOALS, ColumnKind::Integer, true),
    col(MATCH_OUTCOME, ColumnKind::Outcome, true),
    col(HOME_POINTS, ColumnKind::Integer, true),
    col(AWAY_POINTS, ColumnKind::Integer, true),
];

pub fn spec_for(name: &str) -> Option<&'static ColumnSpec> {
    COLUMNS.iter().find(|c| c.name == name)
}
