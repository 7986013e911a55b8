//! Tests for abg-model types.

use std::collections::BTreeMap;

use abg_model::{
    AggregateCell, AggregateTable, AnalysisPeriod, AntibiogramOptions, CellStatus, Interpretation,
    IsolateTest, OrganismClass, ResultCounts, RowError, RowIssue, SourceTable, Stratum,
    StratumTable,
};
use chrono::NaiveDate;

fn counts(s: u32, i: u32, r: u32) -> ResultCounts {
    ResultCounts {
        susceptible: s,
        intermediate: i,
        resistant: r,
    }
}

#[test]
fn cell_from_counts_includes_intermediate_in_denominator() {
    let cell = AggregateCell::from_counts("Escherichia coli", "Ampicillin", counts(6, 2, 2), 30);
    assert_eq!(cell.tested, 10);
    assert_eq!(cell.percent_susceptible, Some(60.0));
    assert!(cell.low_count);
    assert_eq!(
        cell.status(),
        CellStatus::Reported {
            tested: 10,
            percent_susceptible: 60.0
        }
    );
}

#[test]
fn zero_tested_cell_has_no_percent() {
    let cell = AggregateCell::from_counts("Escherichia coli", "Ampicillin", counts(0, 0, 0), 0);
    assert_eq!(cell.percent_susceptible, None);
    assert_eq!(cell.status(), CellStatus::InsufficientData);
}

#[test]
fn min_isolates_zero_disables_low_count() {
    let cell = AggregateCell::from_counts("Escherichia coli", "Ampicillin", counts(1, 0, 0), 0);
    assert!(!cell.low_count);
}

#[test]
fn cell_status_serializes_with_tag() {
    let json = serde_json::to_string(&CellStatus::InsufficientData).expect("serialize status");
    assert_eq!(json, r#"{"status":"insufficient_data"}"#);
}

#[test]
fn table_antibiotics_are_sorted_and_unique() {
    let table = AggregateTable {
        organisms: Vec::new(),
        cells: vec![
            AggregateCell::from_counts("B org", "Meropenem", counts(1, 0, 0), 0),
            AggregateCell::from_counts("A org", "Ampicillin", counts(1, 0, 0), 0),
            AggregateCell::from_counts("B org", "Ampicillin", counts(0, 0, 1), 0),
        ],
    };
    assert_eq!(table.antibiotics(), vec!["Ampicillin", "Meropenem"]);
    assert!(table.cell("B org", "Meropenem").is_some());
    assert!(table.contains_antibiotic("Meropenem"));
}

#[test]
fn empty_stratum_is_insufficient() {
    let table = StratumTable::new(
        Stratum::Class(OrganismClass::FungiYeast),
        0,
        AggregateTable::default(),
    );
    assert!(table.insufficient_data);
    assert_eq!(table.name(), "Fungi/Yeast");
}

#[test]
fn options_deserialize_with_defaults() {
    let options: AntibiogramOptions =
        serde_json::from_str(r#"{"dedup":{"period":{"kind":"calendar_month"}}}"#)
            .expect("deserialize options");
    assert_eq!(options.dedup.period, AnalysisPeriod::CalendarMonth);
    assert_eq!(options.stratification.top_specimens, 5);
    assert_eq!(options.columns.isolates.patient, "Patient");
    assert!(!options.date_formats.is_empty());
}

#[test]
fn rolling_period_round_trips() {
    let period = AnalysisPeriod::RollingDays {
        days: 90,
        anchor: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    };
    let json = serde_json::to_string(&period).expect("serialize period");
    assert_eq!(json, r#"{"kind":"rolling_days","days":90,"anchor":"2024-01-01"}"#);
}

#[test]
fn isolate_helpers() {
    let mut results = BTreeMap::new();
    results.insert("Ampicillin".to_string(), Interpretation::Resistant);
    let isolate = IsolateTest {
        source_row: 0,
        accession: "A1".to_string(),
        patient_id: "P1".to_string(),
        organism: "Escherichia coli".to_string(),
        specimen_type: "Urine".to_string(),
        collected_at: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0),
        results,
    };
    assert_eq!(
        isolate.collection_date(),
        NaiveDate::from_ymd_opt(2024, 3, 1)
    );
    assert_eq!(
        isolate.result_for("Ampicillin"),
        Some(Interpretation::Resistant)
    );
    assert_eq!(isolate.result_for("Meropenem"), None);
}

#[test]
fn row_issue_display_is_one_based() {
    let issue = RowIssue::at(
        SourceTable::Ast,
        4,
        RowError::UnmatchedAccession {
            accession: "X9".to_string(),
        },
    );
    assert_eq!(issue.to_string(), "AST row 5: no isolate row for accession 'X9'");
}
