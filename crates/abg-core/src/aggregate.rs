//! Susceptibility aggregation over any set of deduplicated isolates.

use std::collections::{BTreeMap, BTreeSet};

use abg_model::{
    AggregateCell, AggregateTable, DeduplicatedIsolate, OrganismClass, OrganismClassifier,
    OrganismSummary, ResultCounts, TableOverview,
};

/// Which antibiotics a table reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntibioticPanel {
    All,
    AntifungalOnly,
    /// Everything not flagged as an antifungal.
    AntibacterialOnly,
}

impl AntibioticPanel {
    pub fn for_class(class: OrganismClass) -> Self {
        if class.is_fungal() {
            Self::AntifungalOnly
        } else {
            Self::AntibacterialOnly
        }
    }

    pub fn includes(self, classifier: &OrganismClassifier, antibiotic: &str) -> bool {
        match self {
            Self::All => true,
            Self::AntifungalOnly => classifier.is_antifungal(antibiotic),
            Self::AntibacterialOnly => !classifier.is_antifungal(antibiotic),
        }
    }
}

/// Count results per (organism, antibiotic) pair.
///
/// Pairs with no reported result are absent from the table, as are organisms
/// with no isolate tested inside the panel. Output is sorted by organism, then
/// antibiotic.
pub fn aggregate<'a, I>(
    isolates: I,
    panel: AntibioticPanel,
    classifier: &OrganismClassifier,
    min_isolates: u32,
) -> AggregateTable
where
    I: IntoIterator<Item = &'a DeduplicatedIsolate>,
{
    let mut counts: BTreeMap<(&str, &str), ResultCounts> = BTreeMap::new();
    let mut organisms: BTreeMap<&str, OrganismSummary> = BTreeMap::new();

    for survivor in isolates {
        let organism = survivor.organism();
        let summary = organisms
            .entry(organism)
            .or_insert_with(|| OrganismSummary {
                organism: organism.to_string(),
                isolates: 0,
                tested_isolates: 0,
            });
        summary.isolates += 1;

        let mut tested = false;
        for (antibiotic, interpretation) in &survivor.isolate.results {
            if !panel.includes(classifier, antibiotic) {
                continue;
            }
            counts
                .entry((organism, antibiotic.as_str()))
                .or_default()
                .record(*interpretation);
            tested = true;
        }
        if tested {
            summary.tested_isolates += 1;
        }
    }

    let cells = counts
        .into_iter()
        .map(|((organism, antibiotic), counts)| {
            AggregateCell::from_counts(organism, antibiotic, counts, min_isolates)
        })
        .collect();
    AggregateTable {
        organisms: organisms
            .into_values()
            .filter(|summary| summary.tested_isolates > 0)
            .collect(),
        cells,
    }
}

/// Headline figures for a table built from `isolates` deduplicated isolates.
pub fn summarize(table: &AggregateTable, isolates: u32) -> TableOverview {
    let organisms: BTreeSet<&str> = table
        .cells
        .iter()
        .map(|cell| cell.organism.as_str())
        .collect();
    let tenths: Vec<u64> = table
        .cells
        .iter()
        .filter_map(AggregateCell::percent_tenths)
        .map(u64::from)
        .collect();
    let mean_percent_susceptible = if tenths.is_empty() {
        None
    } else {
        let count = tenths.len() as u64;
        let sum: u64 = tenths.iter().sum();
        let mean_tenths = (2 * sum + count) / (2 * count);
        Some(mean_tenths as f64 / 10.0)
    };
    TableOverview {
        isolates,
        organisms: organisms.len(),
        antibiotics: table.antibiotics().len(),
        cells: table.cells.len(),
        mean_percent_susceptible,
    }
}
