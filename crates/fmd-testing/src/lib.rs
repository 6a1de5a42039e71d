//! Dataset fixtures shared by the fmd test suites.
//!
//! Everything here speaks plain strings and paths, so `fmd-core`'s own unit
//! tests can use it alongside the crate under test.

use std::fs;
use std::path::{Path, PathBuf};

use fmd_core::dataset::{Derived, COLUMNS};
use tempfile::TempDir;

/// Dataset path relative to the repository root.
pub const DATASET: &str = "data/football_matches_2024_2025.csv";

/// Every schema column, in schema order.
pub fn all_columns() -> Vec<&'static str> {
    COLUMNS.iter().map(|c| c.name).collect()
}

fn position(column: &str) -> usize {
    COLUMNS
        .iter()
        .position(|c| c.name == column)
        .unwrap_or_else(|| panic!("unknown column {column}"))
}

/// One dataset row, one cell per schema column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    cells: Vec<String>,
}

impl MatchRow {
    /// A finished Premier League match with consistent derived fields.
    pub fn played(match_id: i64, home: i64, away: i64) -> Self {
        let d = Derived::from_fulltime(home, away).expect("fixture scores fit in i64");
        let cells = COLUMNS
            .iter()
            .map(|c| match c.name {
                "competition_code" => "PL".to_string(),
                "competition_name" => "Premier League".to_string(),
                "season" => "2024".to_string(),
                "match_id" => match_id.to_string(),
                "matchday" => "3".to_string(),
                "stage" => "REGULAR_SEASON".to_string(),
                "status" => "FINISHED".to_string(),
                "date_utc" => "2024-08-31T14:00:00Z".to_string(),
                "referee" => "Michael Oliver".to_string(),
                "referee_id" => "11580".to_string(),
                "home_team_id" => "57".to_string(),
                "home_team" => "Arsenal FC".to_string(),
                "away_team_id" => "397".to_string(),
                "away_team" => "Brighton & Hove Albion FC".to_string(),
                "fulltime_home" => home.to_string(),
                "fulltime_away" => away.to_string(),
                "halftime_home" => home.clamp(0, 1).to_string(),
                "halftime_away" => "0".to_string(),
                "goal_difference" => d.goal_difference.to_string(),
                "total_goals" => d.total_goals.to_string(),
                "match_outcome" => d.outcome.label().to_string(),
                "home_points" => d.home_points.to_string(),
                "away_points" => d.away_points.to_string(),
                other => panic!("no fixture value for column {other}"),
            })
            .collect();
        Self { cells }
    }

    /// A scheduled match: scores and derived fields empty.
    pub fn unplayed(match_id: i64) -> Self {
        let mut row = Self::played(match_id, 0, 0);
        row.set("status", "SCHEDULED");
        for c in [
            "fulltime_home",
            "fulltime_away",
            "halftime_home",
            "halftime_away",
            "goal_difference",
            "total_goals",
            "match_outcome",
            "home_points",
            "away_points",
        ] {
            row.set(c, "");
        }
        row
    }

    /// Overwrite one cell. Panics on a column outside the schema.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> &mut Self {
        self.cells[position(column)] = value.into();
        self
    }

    pub fn get(&self, column: &str) -> &str {
        &self.cells[position(column)]
    }
}

/// CSV text with `columns` as the header. Columns outside the schema get
/// empty cells.
pub fn render_csv(columns: &[&str], rows: &[MatchRow]) -> String {
    let mut out = columns.join(",");
    out.push('\n');
    for r in rows {
        let cells: Vec<&str> = columns
            .iter()
            .map(|c| match COLUMNS.iter().position(|s| s.name == *c) {
                Some(idx) => r.cells[idx].as_str(),
                None => "",
            })
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Temp directory laid out like the dataset repository.
pub struct DatasetRepo {
    pub dir: TempDir,
}

impl DatasetRepo {
    pub fn with_rows(rows: &[MatchRow]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = Self { dir };
        repo.write_dataset(rows);
        repo
    }

    /// Replace the dataset file with `rows` under the full schema header.
    pub fn write_dataset(&self, rows: &[MatchRow]) {
        let path = self.dataset();
        fs::create_dir_all(self.root().join("data")).expect("create data dir");
        fs::write(&path, render_csv(&all_columns(), rows)).expect("write dataset");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn dataset(&self) -> PathBuf {
        self.root().join(DATASET)
    }

    pub fn store(&self) -> PathBuf {
        self.root().join("checksums.sha256")
    }
}
