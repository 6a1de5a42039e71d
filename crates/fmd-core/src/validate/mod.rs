//! Dataset validator: schema, types, primary key, derived fields and
//! referential sanity.
//!
//! All five checks always run and collect every violation; a bad cell is
//! reported by the check that owns it and skipped by the later ones.

mod checks;
mod report;
mod violation;

use anyhow::Result;
use std::path::Path;

use crate::config::ValidationConfig;
use crate::dataset::{MatchRecord, Table};

pub use checks::{check_derived, check_referential, check_schema, check_types, check_unique};
pub use report::{CheckOutcome, ValidationReport};
pub use violation::{CheckKind, RowShape, Violation};

/// Run every check over an in-memory table.
pub fn validate_table(table: &Table, cfg: &ValidationConfig) -> ValidationReport {
    let records: Vec<MatchRecord> = table
        .rows
        .iter()
        .map(|row| MatchRecord::from_row(table, row))
        .collect();

    let checks: Vec<CheckOutcome> = CheckKind::ALL
        .iter()
        .map(|&check| {
            let violations = match check {
                CheckKind::Schema => check_schema(table),
                CheckKind::Type => check_types(table),
                CheckKind::Uniqueness => check_unique(&records),
                CheckKind::Derived => check_derived(&records),
                CheckKind::Referential => check_referential(&records, cfg),
            };
            if violations.is_empty() {
                tracing::debug!("{}: ok", check.title());
            } else {
                tracing::info!("{}: {} violation(s)", check.title(), violations.len());
            }
            CheckOutcome { check, violations }
        })
        .collect();

    ValidationReport::new(None, table.rows.len(), checks)
}

/// Load the dataset at `path` and validate it. Errors only when the file
/// cannot be read as CSV; data problems are in the report.
pub fn validate_path(path: &Path, cfg: &ValidationConfig) -> Result<ValidationReport> {
    let table = Table::load(path)?;
    let mut report = validate_table(&table, cfg);
    report.dataset = Some(path.display().to_string());
    tracing::info!(
        "validated {}: {} rows, {} violation(s)",
        path.display(),
        report.rows_checked,
        report.violation_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests;
