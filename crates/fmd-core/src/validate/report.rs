use serde::Serialize;
use std::fmt::Write as _;

use super::{CheckKind, Violation};

/// Violations found by one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub violations: Vec<Violation>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result of a validator run: what was checked and everything that failed.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Dataset path, when validated from a file.
    pub dataset: Option<String>,
    pub rows_checked: usize,
    pub passed: bool,
    pub checks: Vec<CheckOutcome>,
}

impl ValidationReport {
    pub fn new(dataset: Option<String>, rows_checked: usize, checks: Vec<CheckOutcome>) -> Self {
        let passed = checks.iter().all(CheckOutcome::passed);
        Self {
            dataset,
            rows_checked,
            passed,
            checks,
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn violation_count(&self) -> usize {
        self.checks.iter().map(|c| c.violations.len()).sum()
    }

    pub fn violations(&self, check: CheckKind) -> &[Violation] {
        self.checks
            .iter()
            .find(|c| c.check == check)
            .map(|c| c.violations.as_slice())
            .unwrap_or(&[])
    }

    pub fn all_violations(&self) -> impl Iterator<Item = &Violation> {
        self.checks.iter().flat_map(|c| c.violations.iter())
    }

    /// Human-readable summary: one line per check, then its violations.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.dataset {
            Some(path) => {
                let _ = writeln!(out, "Dataset: {path} ({} rows)", self.rows_checked);
            }
            None => {
                let _ = writeln!(out, "Rows checked: {}", self.rows_checked);
            }
        }
        for c in &self.checks {
            if c.passed() {
                let _ = writeln!(out, "ok   {}: {}", c.check.title(), c.check.ok_message());
            } else {
                let _ = writeln!(
                    out,
                    "FAIL {}: {} issue(s)",
                    c.check.title(),
                    c.violations.len()
                );
                for v in &c.violations {
                    let _ = writeln!(out, "     {v}");
                }
            }
        }
        if self.passed {
            out.push_str("Dataset validation passed.\n");
        } else {
            let _ = writeln!(out, "Validation failed with {} issue(s).", self.violation_count());
        }
        out
    }
}
