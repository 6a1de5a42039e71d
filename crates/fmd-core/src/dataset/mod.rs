//! Dataset loading and the typed view of a match row.
//!
//! The whole CSV is read into memory as strings; typing happens later so the
//! validator can report every bad cell instead of stopping at the first one.

pub mod columns;
mod record;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use columns::{spec_for, ColumnKind, ColumnSpec, COLUMNS};
pub use record::{parse_integer, parse_timestamp, Cell, Derived, MatchOutcome, MatchRecord};

/// One data row with its 1-based line number in the file.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Header plus raw string rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    positions: HashMap<String, usize>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            // First occurrence wins; duplicates are a schema violation.
            positions.entry(h.clone()).or_insert(i);
        }
        Self {
            headers,
            rows,
            positions,
        }
    }

    /// Read a CSV with a header row. Ragged rows are kept as-is.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("read CSV header")?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.context("read CSV record")?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(Row {
                line,
                fields: record.iter().map(str::to_string).collect(),
            });
        }

        Ok(Self::new(headers, rows))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("missing required file: {}", path.display()))?;
        let table = Self::from_reader(file).with_context(|| format!("load {}", path.display()))?;
        tracing::debug!(
            "loaded {} rows x {} columns from {}",
            table.rows.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Raw cell text, or None if the column is absent or the row is short.
    pub fn cell<'a>(&self, row: &'a Row, column: &str) -> Option<&'a str> {
        let idx = *self.positions.get(column)?;
        row.fields.get(idx).map(String::as_str)
    }
}
