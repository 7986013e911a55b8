//! Record normalization: schema check, typing, and the isolate/AST join.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::collections::btree_map::Entry;

use tracing::{trace, warn};

use abg_ingest::CsvTable;
use abg_model::{
    AntibiogramOptions, ColumnMapping, DateRange, IsolateTest, MissingColumn, RequiredField,
    RowError, RowIssue, SchemaError, SourceTable, canonical_name, lookup_key,
};

use crate::datetime::DateParser;
use crate::interpretation::{InterpretationMap, ResultValue};
use crate::logging::redact_value;

/// Counts gathered while normalizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub isolate_rows_in: usize,
    pub ast_rows_in: usize,
    pub isolates_retained: usize,
    pub isolate_rows_dropped: usize,
    pub ast_rows_dropped: usize,
    /// Reason code to dropped row count, across both tables.
    pub dropped_reasons: BTreeMap<String, usize>,
    pub results_recorded: usize,
    pub date_range: Option<DateRange>,
    /// Retained isolates without a usable collection date.
    pub undated: usize,
}

impl NormalizeStats {
    pub fn rows_dropped(&self) -> usize {
        self.isolate_rows_dropped + self.ast_rows_dropped
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Retained isolates in isolates-table order.
    pub isolates: Vec<IsolateTest>,
    pub issues: Vec<RowIssue>,
    pub stats: NormalizeStats,
}

/// Strip whitespace and the `.0` suffix spreadsheet exports add to numeric keys.
pub fn canonical_accession(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_suffix(".0") {
        Some(base) if !base.is_empty() && base.bytes().all(|b| b.is_ascii_digit()) => {
            base.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Every configured column that neither table provides, isolates first.
fn missing_columns(
    isolates: &CsvTable,
    ast: &CsvTable,
    columns: &ColumnMapping,
) -> Vec<MissingColumn> {
    let isolate_missing = isolates
        .missing_columns(&columns.isolates.required())
        .into_iter()
        .map(|column| (SourceTable::Isolates, column));
    let ast_missing = ast
        .missing_columns(&columns.ast.required())
        .into_iter()
        .map(|column| (SourceTable::Ast, column));
    isolate_missing
        .chain(ast_missing)
        .map(|(table, column)| MissingColumn {
            table,
            column: column.to_string(),
        })
        .collect()
}

fn column(table: &CsvTable, source: SourceTable, name: &str) -> Result<usize, SchemaError> {
    table.column_index(name).ok_or_else(|| {
        schema_failure(vec![MissingColumn {
            table: source,
            column: name.to_string(),
        }])
    })
}

fn schema_failure(missing: Vec<MissingColumn>) -> SchemaError {
    let error = SchemaError { missing };
    warn!(%error, "input schema check failed");
    error
}

struct IssueLog {
    issues: Vec<RowIssue>,
    stats: NormalizeStats,
}

impl IssueLog {
    fn flag(&mut self, table: SourceTable, row: usize, error: RowError) {
        if error.is_drop() {
            *self.stats.dropped_reasons.entry(error.reason()).or_default() += 1;
            match table {
                SourceTable::Isolates => self.stats.isolate_rows_dropped += 1,
                SourceTable::Ast => self.stats.ast_rows_dropped += 1,
            }
        }
        self.issues.push(RowIssue::at(table, row, error));
    }
}

/// Validate both tables, type every retained row, and attach AST results.
///
/// Only a missing column is fatal. Every row-level problem is recorded as a
/// [`RowIssue`] and the run continues.
pub fn normalize(
    isolates: &CsvTable,
    ast: &CsvTable,
    options: &AntibiogramOptions,
) -> Result<Normalized, SchemaError> {
    let columns = &options.columns;
    let missing = missing_columns(isolates, ast, columns);
    if !missing.is_empty() {
        return Err(schema_failure(missing));
    }
    let iso = SourceTable::Isolates;
    let iso_accession = column(isolates, iso, &columns.isolates.accession)?;
    let iso_patient = column(isolates, iso, &columns.isolates.patient)?;
    let iso_organism = column(isolates, iso, &columns.isolates.organism)?;
    let iso_specimen = column(isolates, iso, &columns.isolates.specimen_type)?;
    let iso_collected = column(isolates, iso, &columns.isolates.collected_on)?;
    let ast_accession = column(ast, SourceTable::Ast, &columns.ast.accession)?;
    let ast_antibiotic = column(ast, SourceTable::Ast, &columns.ast.antibiotic)?;
    let ast_result = column(ast, SourceTable::Ast, &columns.ast.interpretation)?;
    let ast_organism = columns
        .ast
        .organism
        .as_deref()
        .map(|name| column(ast, SourceTable::Ast, name))
        .transpose()?;

    let dates = DateParser::new(&options.date_formats);
    let codes = InterpretationMap::new(&options.interpretations);
    let mut log = IssueLog {
        issues: Vec::new(),
        stats: NormalizeStats {
            isolate_rows_in: isolates.len(),
            ast_rows_in: ast.len(),
            ..NormalizeStats::default()
        },
    };

    let mut retained: Vec<IsolateTest> = Vec::with_capacity(isolates.len());
    let mut by_accession: HashMap<String, Vec<usize>> = HashMap::new();
    let mut dropped_accessions: BTreeSet<String> = BTreeSet::new();

    for row in 0..isolates.len() {
        let accession = canonical_accession(isolates.value(row, iso_accession));
        let patient_id = isolates.value(row, iso_patient).trim().to_string();
        let organism = canonical_name(isolates.value(row, iso_organism));
        let specimen_type = canonical_name(isolates.value(row, iso_specimen));

        let absent = if patient_id.is_empty() {
            Some(RequiredField::PatientId)
        } else if organism.is_empty() {
            Some(RequiredField::Organism)
        } else if specimen_type.is_empty() {
            Some(RequiredField::SpecimenType)
        } else {
            None
        };
        if let Some(field) = absent {
            warn!(row = row + 1, field = %field, "isolate row dropped");
            log.flag(iso, row, RowError::MissingField { field });
            if !accession.is_empty() {
                dropped_accessions.insert(accession);
            }
            continue;
        }

        let raw_date = isolates.value(row, iso_collected);
        let collected_at = dates.parse(raw_date);
        if collected_at.is_none() {
            let error = if raw_date.trim().is_empty() {
                RowError::MissingDate
            } else {
                RowError::DateParse {
                    value: raw_date.to_string(),
                }
            };
            log.flag(iso, row, error);
        }
        trace!(
            row = row + 1,
            patient = redact_value(&patient_id),
            organism = %organism,
            "isolate normalized"
        );

        if !accession.is_empty() {
            by_accession
                .entry(accession.clone())
                .or_default()
                .push(retained.len());
        }
        retained.push(IsolateTest {
            source_row: row,
            accession,
            patient_id,
            organism,
            specimen_type,
            collected_at,
            results: BTreeMap::new(),
        });
    }

    for row in 0..ast.len() {
        let antibiotic = canonical_name(ast.value(row, ast_antibiotic));
        if antibiotic.is_empty() {
            log.flag(SourceTable::Ast, row, RowError::MissingAntibiotic);
            continue;
        }
        let accession = canonical_accession(ast.value(row, ast_accession));
        let organism_key = ast_organism
            .map(|column| lookup_key(ast.value(row, column)))
            .filter(|key| !key.is_empty());
        let targets: Vec<usize> = by_accession
            .get(&accession)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&index| {
                organism_key
                    .as_ref()
                    .is_none_or(|key| lookup_key(&retained[index].organism) == *key)
            })
            .collect();
        if targets.is_empty() {
            let error = if dropped_accessions.contains(&accession) {
                RowError::IsolateDropped { accession }
            } else {
                RowError::UnmatchedAccession { accession }
            };
            log.flag(SourceTable::Ast, row, error);
            continue;
        }

        let raw = ast.value(row, ast_result);
        let interpretation = match codes.classify(raw) {
            ResultValue::Reported(interpretation) => interpretation,
            ResultValue::NotTested => continue,
            ResultValue::Unrecognized => {
                log.flag(
                    SourceTable::Ast,
                    row,
                    RowError::UnknownInterpretation {
                        antibiotic,
                        value: raw.to_string(),
                    },
                );
                continue;
            }
        };

        for index in targets {
            let isolate = &mut retained[index];
            match isolate.results.entry(antibiotic.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(interpretation);
                    log.stats.results_recorded += 1;
                }
                Entry::Occupied(slot) if *slot.get() != interpretation => {
                    let kept = *slot.get();
                    log.flag(
                        SourceTable::Ast,
                        row,
                        RowError::DuplicateResult {
                            accession: isolate.accession.clone(),
                            antibiotic: antibiotic.clone(),
                            kept,
                            ignored: interpretation,
                        },
                    );
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    let mut stats = log.stats;
    stats.isolates_retained = retained.len();
    for date in retained.iter().filter_map(IsolateTest::collection_date) {
        match stats.date_range.as_mut() {
            Some(range) => range.include(date),
            None => stats.date_range = Some(DateRange::single(date)),
        }
    }
    stats.undated = retained
        .iter()
        .filter(|isolate| isolate.collected_at.is_none())
        .count();
    if stats.rows_dropped() > 0 {
        warn!(
            isolate_rows = stats.isolate_rows_dropped,
            ast_rows = stats.ast_rows_dropped,
            "rows dropped during normalization"
        );
    }

    Ok(Normalized {
        isolates: retained,
        issues: log.issues,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accession_float_suffix_is_removed() {
        assert_eq!(canonical_accession(" 23399301001.0 "), "23399301001");
        assert_eq!(canonical_accession("AB-12.0"), "AB-12.0");
        assert_eq!(canonical_accession(".0"), ".0");
    }
}
