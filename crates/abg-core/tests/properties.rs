//! Property tests for deduplication and aggregation.

use std::collections::{BTreeMap, BTreeSet};

use abg_core::{AntibioticPanel, aggregate, build_antibiogram, deduplicate};
use abg_ingest::CsvTable;
use abg_model::{
    AntibiogramOptions, DedupOptions, Interpretation, IsolateTest, Taxonomy, percent_susceptible,
};
use chrono::NaiveDate;
use proptest::prelude::*;

const PATIENTS: &[&str] = &["P1", "P2", "P3"];
const ORGANISMS: &[&str] = &["Escherichia coli", "Staphylococcus aureus", "Candida albicans"];
const ANTIBIOTICS: &[&str] = &["Ampicillin", "Vancomycin", "Fluconazole"];

/// (patient index, organism index, days after 2023-01-01, result per antibiotic)
type Seed = (usize, usize, Option<u32>, Vec<Option<Interpretation>>);

fn interpretation() -> impl Strategy<Value = Interpretation> {
    prop_oneof![
        Just(Interpretation::Susceptible),
        Just(Interpretation::Intermediate),
        Just(Interpretation::Resistant),
    ]
}

fn isolate_strategy() -> impl Strategy<Value = Seed> {
    (
        0..PATIENTS.len(),
        0..ORGANISMS.len(),
        proptest::option::weighted(0.9, 0u32..730),
        proptest::collection::vec(proptest::option::of(interpretation()), ANTIBIOTICS.len()),
    )
}

fn build_isolates(seeds: &[Seed]) -> Vec<IsolateTest> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    seeds
        .iter()
        .enumerate()
        .map(|(row, (patient, organism, offset, results))| IsolateTest {
            source_row: row,
            accession: format!("A{row}"),
            patient_id: PATIENTS[*patient].to_string(),
            organism: ORGANISMS[*organism].to_string(),
            specimen_type: "Blood".to_string(),
            collected_at: offset.map(|days| {
                (base + chrono::Days::new(u64::from(days)))
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            }),
            results: ANTIBIOTICS
                .iter()
                .zip(results)
                .filter_map(|(name, value)| value.map(|value| ((*name).to_string(), value)))
                .collect::<BTreeMap<_, _>>(),
        })
        .collect()
}

proptest! {
    #[test]
    fn dedup_keeps_one_isolate_per_group(
        seeds in proptest::collection::vec(isolate_strategy(), 0..40)
    ) {
        let isolates = build_isolates(&seeds);
        let result = deduplicate(&isolates, &DedupOptions::default());
        let mut seen = BTreeSet::new();
        for survivor in &result.isolates {
            let key = (
                survivor.patient_id().to_string(),
                survivor.organism().to_string(),
                survivor.period.clone(),
            );
            prop_assert!(seen.insert(key));
        }
        prop_assert_eq!(
            result.stats.retained + result.stats.repeats_removed,
            isolates.len()
        );
    }

    #[test]
    fn dedup_survivor_is_earliest_in_its_group(
        seeds in proptest::collection::vec(isolate_strategy(), 0..40)
    ) {
        let isolates = build_isolates(&seeds);
        let options = DedupOptions::default();
        let result = deduplicate(&isolates, &options);
        for survivor in &result.isolates {
            let Some(date) = survivor.isolate.collection_date() else {
                continue;
            };
            for other in &isolates {
                let same_group = other.patient_id == survivor.patient_id()
                    && other.organism == survivor.organism()
                    && other
                        .collection_date()
                        .is_some_and(|day| options.period.key_for(day) == survivor.period);
                if same_group {
                    let other_date = other.collection_date().unwrap();
                    prop_assert!(date <= other_date);
                    if date == other_date {
                        prop_assert!(survivor.isolate.source_row <= other.source_row);
                    }
                }
            }
        }
    }

    #[test]
    fn aggregate_counts_match_survivors(
        seeds in proptest::collection::vec(isolate_strategy(), 0..40)
    ) {
        let isolates = build_isolates(&seeds);
        let survivors = deduplicate(&isolates, &DedupOptions::default()).isolates;
        let classifier = Taxonomy::default().classifier();
        let table = aggregate(&survivors, AntibioticPanel::All, &classifier, 30);
        for cell in &table.cells {
            let results: Vec<Interpretation> = survivors
                .iter()
                .filter(|survivor| survivor.organism() == cell.organism)
                .filter_map(|survivor| survivor.isolate.result_for(&cell.antibiotic))
                .collect();
            let susceptible = results.iter().filter(|value| value.is_susceptible()).count();
            prop_assert!(cell.tested >= 1);
            prop_assert_eq!(cell.tested as usize, results.len());
            prop_assert_eq!(cell.susceptible as usize, susceptible);
            prop_assert_eq!(
                cell.tested,
                cell.susceptible + cell.intermediate + cell.resistant
            );
            let exact = 100.0 * cell.susceptible as f64 / cell.tested as f64;
            let reported = cell.percent_susceptible.unwrap();
            prop_assert!((reported - exact).abs() <= 0.05 + 1e-9);
            prop_assert_eq!(
                cell.percent_susceptible,
                percent_susceptible(cell.susceptible, cell.tested)
            );
        }
    }

    #[test]
    fn antifungals_stay_in_fungal_tables(
        seeds in proptest::collection::vec(isolate_strategy(), 0..40)
    ) {
        let isolates = build_isolates(&seeds);
        let survivors = deduplicate(&isolates, &DedupOptions::default()).isolates;
        let classifier = Taxonomy::default().classifier();
        let fungal = aggregate(&survivors, AntibioticPanel::AntifungalOnly, &classifier, 30);
        let bacterial = aggregate(&survivors, AntibioticPanel::AntibacterialOnly, &classifier, 30);
        prop_assert!(fungal.cells.iter().all(|cell| classifier.is_antifungal(&cell.antibiotic)));
        prop_assert!(bacterial.cells.iter().all(|cell| !classifier.is_antifungal(&cell.antibiotic)));
    }

    #[test]
    fn report_json_is_reproducible(
        seeds in proptest::collection::vec(isolate_strategy(), 0..25)
    ) {
        let isolates = build_isolates(&seeds);
        let isolate_rows: Vec<Vec<String>> = isolates
            .iter()
            .map(|isolate| {
                vec![
                    isolate.accession.clone(),
                    isolate.patient_id.clone(),
                    isolate.organism.clone(),
                    isolate.specimen_type.clone(),
                    isolate
                        .collected_at
                        .map(|at| at.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        let ast_rows: Vec<Vec<String>> = isolates
            .iter()
            .flat_map(|isolate| {
                isolate.results.iter().map(|(antibiotic, value)| {
                    vec![
                        isolate.accession.clone(),
                        antibiotic.clone(),
                        value.code().to_string(),
                    ]
                })
            })
            .collect();
        let isolate_table = CsvTable::new(
            ["Specimen", "Patient", "Organism", "Sample Type", "Created on"],
            isolate_rows,
        );
        let ast_table = CsvTable::new(["Specimen", "Antimicrobial", "Interpretation"], ast_rows);
        let options = AntibiogramOptions::default();

        let first = build_antibiogram(&isolate_table, &ast_table, &options).unwrap();
        let second = build_antibiogram(&isolate_table, &ast_table, &options).unwrap();
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
