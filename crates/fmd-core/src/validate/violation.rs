//! Violation types reported by the validator.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::dataset::ColumnKind;

/// The five checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Schema,
    Type,
    Uniqueness,
    Derived,
    Referential,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        CheckKind::Schema,
        CheckKind::Type,
        CheckKind::Uniqueness,
        CheckKind::Derived,
        CheckKind::Referential,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CheckKind::Schema => "Schema",
            CheckKind::Type => "Types",
            CheckKind::Uniqueness => "Primary key",
            CheckKind::Derived => "Derived fields",
            CheckKind::Referential => "Referential sanity",
        }
    }

    /// Summary line used when the check found nothing.
    pub fn ok_message(self) -> &'static str {
        match self {
            CheckKind::Schema => "expected columns present, no unexpected columns",
            CheckKind::Type => "all values conform to their column types",
            CheckKind::Uniqueness => "match_id is unique",
            CheckKind::Derived => "derived fields match fulltime scores",
            CheckKind::Referential => "teams differ and scores are sane",
        }
    }
}

/// Row whose field count differs from the header. Reported as a
/// `TypeError` with `"kind": "row_shape"` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    pub line: u64,
    pub expected: usize,
    pub found: usize,
}

impl Serialize for RowShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RowShape", 4)?;
        s.serialize_field("kind", "row_shape")?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("expected", &self.expected)?;
        s.serialize_field("found", &self.found)?;
        s.end()
    }
}

/// A single problem found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error")]
pub enum Violation {
    #[serde(rename = "SchemaError")]
    Schema {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    #[serde(rename = "TypeError")]
    Type {
        line: u64,
        column: String,
        value: String,
        expected: ColumnKind,
    },
    #[serde(rename = "TypeError")]
    RowShape(RowShape),
    #[serde(rename = "DuplicateKeyError")]
    DuplicateKey { match_id: i64, lines: Vec<u64> },
    #[serde(rename = "DerivedMismatchError")]
    DerivedMismatch {
        line: u64,
        match_id: Option<i64>,
        field: &'static str,
        expected: String,
        actual: String,
    },
    #[serde(rename = "ReferentialError")]
    Referential {
        line: u64,
        match_id: Option<i64>,
        reason: String,
    },
}

impl Violation {
    pub fn check(&self) -> CheckKind {
        match self {
            Violation::Schema { .. } => CheckKind::Schema,
            Violation::Type { .. } | Violation::RowShape(_) => CheckKind::Type,
            Violation::DuplicateKey { .. } => CheckKind::Uniqueness,
            Violation::DerivedMismatch { .. } => CheckKind::Derived,
            Violation::Referential { .. } => CheckKind::Referential,
        }
    }

    pub fn error_name(&self) -> &'static str {
        match self {
            Violation::Schema { .. } => "SchemaError",
            Violation::Type { .. } | Violation::RowShape(_) => "TypeError",
            Violation::DuplicateKey { .. } => "DuplicateKeyError",
            Violation::DerivedMismatch { .. } => "DerivedMismatchError",
            Violation::Referential { .. } => "ReferentialError",
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, line: u64, match_id: Option<i64>) -> fmt::Result {
    match match_id {
        Some(id) => write!(f, "line {line} (match_id {id})"),
        None => write!(f, "line {line}"),
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.error_name())?;
        match self {
            Violation::Schema {
                missing,
                unexpected,
            } => {
                if !missing.is_empty() {
                    write!(f, "missing columns [{}]", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    if !missing.is_empty() {
                        write!(f, "; ")?;
                    }
                    write!(f, "unexpected columns [{}]", unexpected.join(", "))?;
                }
                Ok(())
            }
            Violation::Type {
                line,
                column,
                value,
                expected,
            } => {
                if value.trim().is_empty() {
                    write!(f, "line {line}, column '{column}': expected {expected}, got empty value")
                } else {
                    write!(f, "line {line}, column '{column}': expected {expected}, got {value:?}")
                }
            }
            Violation::RowShape(RowShape {
                line,
                expected,
                found,
            }) => write!(f, "line {line} has {found} fields, expected {expected}"),
            Violation::DuplicateKey { match_id, lines } => {
                let lines: Vec<String> = lines.iter().map(u64::to_string).collect();
                write!(
                    f,
                    "match_id {match_id} appears {} times (lines {})",
                    lines.len(),
                    lines.join(", ")
                )
            }
            Violation::DerivedMismatch {
                line,
                match_id,
                field,
                expected,
                actual,
            } => {
                write_row(f, *line, *match_id)?;
                write!(f, ", {field}: expected {expected}, found {actual}")
            }
            Violation::Referential {
                line,
                match_id,
                reason,
            } => {
                write_row(f, *line, *match_id)?;
                write!(f, ": {reason}")
            }
        }
    }
}
