mod common;

use std::collections::BTreeMap;

use abg_core::normalize;
use abg_ingest::CsvTable;
use abg_model::{AntibiogramOptions, Interpretation, RowError, SourceTable};

use common::{ast_table, isolates_table};

#[test]
fn joins_results_and_canonicalizes_names() {
    let isolates = isolates_table(&[[
        "1001.0",
        " P1 ",
        "Escherichia   coli",
        " Urine ",
        "2024-01-05",
    ]]);
    let ast = ast_table(&[
        ["1001", " Ampicillin ", "susceptible"],
        ["1001", "Ciprofloxacin", "SDD"],
        ["1001", "Meropenem", "Not tested"],
    ]);

    let normalized =
        normalize(&isolates, &ast, &AntibiogramOptions::default()).expect("normalize");
    assert_eq!(normalized.isolates.len(), 1);
    let isolate = &normalized.isolates[0];
    assert_eq!(isolate.accession, "1001");
    assert_eq!(isolate.patient_id, "P1");
    assert_eq!(isolate.organism, "Escherichia coli");
    assert_eq!(isolate.specimen_type, "Urine");
    assert_eq!(
        isolate.result_for("Ampicillin"),
        Some(Interpretation::Susceptible)
    );
    assert_eq!(
        isolate.result_for("Ciprofloxacin"),
        Some(Interpretation::Intermediate)
    );
    assert_eq!(isolate.result_for("Meropenem"), None);
    assert!(normalized.issues.is_empty());
    assert_eq!(normalized.stats.results_recorded, 2);
}

#[test]
fn unknown_interpretation_is_flagged_but_not_dropped() {
    let isolates = isolates_table(&[["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"]]);
    let ast = ast_table(&[["A1", "Ampicillin", "pending"]]);

    let normalized =
        normalize(&isolates, &ast, &AntibiogramOptions::default()).expect("normalize");
    assert!(normalized.isolates[0].results.is_empty());
    assert_eq!(normalized.stats.rows_dropped(), 0);
    assert_eq!(normalized.issues.len(), 1);
    assert_eq!(normalized.issues[0].table, Some(SourceTable::Ast));
    assert!(matches!(
        &normalized.issues[0].error,
        RowError::UnknownInterpretation { value, .. } if value == "pending"
    ));
}

#[test]
fn configured_alias_maps_to_category() {
    let isolates = isolates_table(&[["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"]]);
    let ast = ast_table(&[["A1", "Ampicillin", "RES"]]);
    let mut options = AntibiogramOptions::default();
    options.interpretations = BTreeMap::from([("res".to_string(), Interpretation::Resistant)]);

    let normalized = normalize(&isolates, &ast, &options).expect("normalize");
    assert_eq!(
        normalized.isolates[0].result_for("Ampicillin"),
        Some(Interpretation::Resistant)
    );
}

#[test]
fn first_result_wins_and_conflict_is_flagged() {
    let isolates = isolates_table(&[["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"]]);
    let ast = ast_table(&[
        ["A1", "Ampicillin", ""],
        ["A1", "Ampicillin", "R"],
        ["A1", "Ampicillin", "S"],
        ["A1", "Ampicillin", "R"],
    ]);

    let normalized =
        normalize(&isolates, &ast, &AntibiogramOptions::default()).expect("normalize");
    assert_eq!(
        normalized.isolates[0].result_for("Ampicillin"),
        Some(Interpretation::Resistant)
    );
    let duplicates: Vec<usize> = normalized
        .issues
        .iter()
        .filter(|issue| matches!(issue.error, RowError::DuplicateResult { .. }))
        .filter_map(|issue| issue.row)
        .collect();
    assert_eq!(duplicates, vec![2]);
}

#[test]
fn shared_accession_attaches_results_to_every_isolate() {
    let isolates = isolates_table(&[
        ["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"],
        ["A1", "P1", "Enterococcus faecalis", "Urine", "2024-01-05"],
    ]);
    let ast = ast_table(&[["A1", "Ampicillin", "S"]]);

    let normalized =
        normalize(&isolates, &ast, &AntibiogramOptions::default()).expect("normalize");
    assert!(
        normalized
            .isolates
            .iter()
            .all(|isolate| isolate.result_for("Ampicillin").is_some())
    );
}

#[test]
fn ast_organism_column_disambiguates_polymicrobial_specimens() {
    let isolates = isolates_table(&[
        ["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"],
        ["A1", "P1", "Enterococcus faecalis", "Urine", "2024-01-05"],
    ]);
    let ast = CsvTable::new(
        ["Specimen", "Antimicrobial", "Interpretation", "Organism"],
        vec![
            vec!["A1", "Ampicillin", "R", "escherichia coli"],
            vec!["A1", "Vancomycin", "S", "Enterococcus faecalis"],
            vec!["A1", "Nitrofurantoin", "S", "Klebsiella pneumoniae"],
        ],
    );
    let mut options = AntibiogramOptions::default();
    options.columns.ast.organism = Some("Organism".to_string());

    let normalized = normalize(&isolates, &ast, &options).expect("normalize");
    let coli = &normalized.isolates[0];
    let faecalis = &normalized.isolates[1];
    assert_eq!(coli.results.len(), 1);
    assert_eq!(coli.result_for("Ampicillin"), Some(Interpretation::Resistant));
    assert_eq!(faecalis.results.len(), 1);
    assert_eq!(
        faecalis.result_for("Vancomycin"),
        Some(Interpretation::Susceptible)
    );
    assert_eq!(
        normalized.stats.dropped_reasons.get("unmatched_accession"),
        Some(&1)
    );
}

#[test]
fn headers_match_case_insensitively() {
    let isolates = CsvTable::new(
        ["SPECIMEN", "patient", "organism", "sample  type", "CREATED ON"],
        vec![vec!["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"]],
    );
    let ast = ast_table(&[["A1", "Ampicillin", "S"]]);
    let normalized =
        normalize(&isolates, &ast, &AntibiogramOptions::default()).expect("normalize");
    assert_eq!(normalized.isolates.len(), 1);
}

#[test]
fn empty_tables_normalize_to_nothing() {
    let isolates = isolates_table(&[]);
    let ast = ast_table(&[]);
    let normalized =
        normalize(&isolates, &ast, &AntibiogramOptions::default()).expect("normalize");
    assert!(normalized.isolates.is_empty());
    assert_eq!(normalized.stats.date_range, None);
}

#[test]
fn configured_ast_organism_column_is_required() {
    let isolates = isolates_table(&[["A1", "P1", "Escherichia coli", "Urine", "2024-01-05"]]);
    let ast = ast_table(&[["A1", "Ampicillin", "S"]]);
    let mut options = AntibiogramOptions::default();
    options.columns.ast.organism = Some("Organism".to_string());

    let err = normalize(&isolates, &ast, &options).expect_err("schema error");
    assert!(err.columns(SourceTable::Isolates).is_empty());
    assert_eq!(err.columns(SourceTable::Ast), vec!["Organism"]);
}
