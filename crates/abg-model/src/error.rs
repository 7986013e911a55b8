//! Row-level and dataset-level error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::isolate::Interpretation;

/// Input table a row or column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Isolates,
    Ast,
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isolates => f.write_str("isolates"),
            Self::Ast => f.write_str("AST"),
        }
    }
}

/// Fields an isolate row cannot be counted without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    PatientId,
    Organism,
    SpecimenType,
}

impl RequiredField {
    pub fn code(self) -> &'static str {
        match self {
            Self::PatientId => "patient_id",
            Self::Organism => "organism",
            Self::SpecimenType => "specimen_type",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Recoverable problem with a single row or stratum.
///
/// None of these abort a run; they are accumulated into the report metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    #[error("missing required field {field}")]
    MissingField { field: RequiredField },

    #[error("missing collection date; isolate treated as undated")]
    MissingDate,

    #[error("unparseable collection date '{value}'")]
    DateParse { value: String },

    #[error("unrecognized result '{value}' for {antibiotic}; treated as not tested")]
    UnknownInterpretation { antibiotic: String, value: String },

    #[error("AST row has no antibiotic name")]
    MissingAntibiotic,

    #[error("no isolate row for accession '{accession}'")]
    UnmatchedAccession { accession: String },

    #[error("isolate row for accession '{accession}' was dropped")]
    IsolateDropped { accession: String },

    #[error("conflicting {antibiotic} results for accession '{accession}'; kept {kept}, ignored {ignored}")]
    DuplicateResult {
        accession: String,
        antibiotic: String,
        kept: Interpretation,
        ignored: Interpretation,
    },

    #[error("isolate without collection date excluded from deduplication")]
    UndatedExcluded,

    #[error("organism '{organism}' is not in the taxonomy; excluded from class strata")]
    UnclassifiedOrganism { organism: String },

    #[error("stratum '{stratum}' has no qualifying isolates")]
    EmptyStratum { stratum: String },
}

impl RowError {
    /// Whether the row was removed from the data set.
    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::MissingAntibiotic
                | Self::UnmatchedAccession { .. }
                | Self::IsolateDropped { .. }
                | Self::UndatedExcluded
        )
    }

    /// Stable reason code used for drop tallies.
    pub fn reason(&self) -> String {
        match self {
            Self::MissingField { field } => format!("missing_{}", field.code()),
            Self::MissingDate => "missing_date".to_string(),
            Self::DateParse { .. } => "date_parse".to_string(),
            Self::UnknownInterpretation { .. } => "unknown_interpretation".to_string(),
            Self::MissingAntibiotic => "missing_antibiotic".to_string(),
            Self::UnmatchedAccession { .. } => "unmatched_accession".to_string(),
            Self::IsolateDropped { .. } => "isolate_dropped".to_string(),
            Self::DuplicateResult { .. } => "duplicate_result".to_string(),
            Self::UndatedExcluded => "undated_excluded".to_string(),
            Self::UnclassifiedOrganism { .. } => "unclassified_organism".to_string(),
            Self::EmptyStratum { .. } => "empty_stratum".to_string(),
        }
    }
}

/// A [`RowError`] with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub table: Option<SourceTable>,
    /// Zero-based data row index within `table`.
    pub row: Option<usize>,
    pub error: RowError,
}

impl RowIssue {
    pub fn at(table: SourceTable, row: usize, error: RowError) -> Self {
        Self {
            table: Some(table),
            row: Some(row),
            error,
        }
    }

    pub fn unlocated(error: RowError) -> Self {
        Self {
            table: None,
            row: None,
            error,
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.table, self.row) {
            (Some(table), Some(row)) => write!(f, "{table} row {}: {}", row + 1, self.error),
            (Some(table), None) => write!(f, "{table}: {}", self.error),
            _ => write!(f, "{}", self.error),
        }
    }
}

/// A configured column that is absent from an input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub table: SourceTable,
    pub column: String,
}

/// Fatal: required columns are absent, so nothing can be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("missing required column(s): {}", describe_missing(.missing))]
pub struct SchemaError {
    pub missing: Vec<MissingColumn>,
}

impl SchemaError {
    pub fn columns(&self, table: SourceTable) -> Vec<&str> {
        self.missing
            .iter()
            .filter(|missing| missing.table == table)
            .map(|missing| missing.column.as_str())
            .collect()
    }
}

fn describe_missing(missing: &[MissingColumn]) -> String {
    missing
        .iter()
        .map(|column| format!("{}.'{}'", column.table, column.column))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_every_column() {
        let error = SchemaError {
            missing: vec![
                MissingColumn {
                    table: SourceTable::Isolates,
                    column: "Patient".to_string(),
                },
                MissingColumn {
                    table: SourceTable::Ast,
                    column: "Interpretation".to_string(),
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "missing required column(s): isolates.'Patient', AST.'Interpretation'"
        );
        assert_eq!(error.columns(SourceTable::Ast), vec!["Interpretation"]);
    }

    #[test]
    fn drop_reasons() {
        let error = RowError::MissingField {
            field: RequiredField::PatientId,
        };
        assert!(error.is_drop());
        assert_eq!(error.reason(), "missing_patient_id");
        assert!(
            !RowError::DateParse {
                value: "x".to_string()
            }
            .is_drop()
        );
        assert!(!RowError::MissingDate.is_drop());
        assert_eq!(RowError::MissingDate.reason(), "missing_date");
    }
}
