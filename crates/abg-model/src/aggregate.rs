//! Susceptibility aggregate cells and tables.

use serde::{Deserialize, Serialize};

use crate::isolate::Interpretation;

/// Tallies of interpreted results for one organism/antibiotic pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCounts {
    pub susceptible: u32,
    pub intermediate: u32,
    pub resistant: u32,
}

impl ResultCounts {
    pub fn record(&mut self, interpretation: Interpretation) {
        match interpretation {
            Interpretation::Susceptible => self.susceptible += 1,
            Interpretation::Intermediate => self.intermediate += 1,
            Interpretation::Resistant => self.resistant += 1,
        }
    }

    /// Isolates with a non-missing result (the cell's N).
    pub fn tested(&self) -> u32 {
        self.susceptible + self.intermediate + self.resistant
    }
}

/// Percent susceptible in tenths of a percent, rounded half-up.
///
/// Returns `None` when nothing was tested.
pub fn percent_tenths(susceptible: u32, tested: u32) -> Option<u32> {
    if tested == 0 {
        return None;
    }
    let s = u64::from(susceptible.min(tested));
    let n = u64::from(tested);
    u32::try_from((2000 * s + n) / (2 * n)).ok()
}

/// Percent susceptible rounded half-up to one decimal place.
pub fn percent_susceptible(susceptible: u32, tested: u32) -> Option<f64> {
    percent_tenths(susceptible, tested).map(|tenths| f64::from(tenths) / 10.0)
}

/// One organism/antibiotic cell of an antibiogram table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateCell {
    pub organism: String,
    pub antibiotic: String,
    /// Isolates with a reported result for this antibiotic.
    pub tested: u32,
    pub susceptible: u32,
    pub intermediate: u32,
    pub resistant: u32,
    /// `None` only when `tested` is zero.
    pub percent_susceptible: Option<f64>,
    /// Set when `tested` is below the configured reporting minimum.
    pub low_count: bool,
}

impl AggregateCell {
    pub fn from_counts(
        organism: impl Into<String>,
        antibiotic: impl Into<String>,
        counts: ResultCounts,
        min_isolates: u32,
    ) -> Self {
        let tested = counts.tested();
        Self {
            organism: organism.into(),
            antibiotic: antibiotic.into(),
            tested,
            susceptible: counts.susceptible,
            intermediate: counts.intermediate,
            resistant: counts.resistant,
            percent_susceptible: percent_susceptible(counts.susceptible, tested),
            low_count: tested < min_isolates,
        }
    }

    pub fn percent_tenths(&self) -> Option<u32> {
        percent_tenths(self.susceptible, self.tested)
    }

    pub fn status(&self) -> CellStatus {
        match self.percent_susceptible {
            Some(percent) if self.tested > 0 => CellStatus::Reported {
                tested: self.tested,
                percent_susceptible: percent,
            },
            _ => CellStatus::InsufficientData,
        }
    }
}

/// What a renderer should show for an organism/antibiotic pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CellStatus {
    Reported { tested: u32, percent_susceptible: f64 },
    InsufficientData,
}

/// Per-organism counts within one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismSummary {
    pub organism: String,
    /// Deduplicated isolates of this organism in the table's input.
    pub isolates: u32,
    /// Isolates with at least one result inside the table's antibiotic panel.
    pub tested_isolates: u32,
}

/// Aggregated cells for one set of deduplicated isolates.
///
/// Only organisms with at least one tested isolate are listed. Organisms and
/// cells are sorted by organism, then antibiotic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    pub organisms: Vec<OrganismSummary>,
    pub cells: Vec<AggregateCell>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, organism: &str, antibiotic: &str) -> Option<&AggregateCell> {
        self.cells
            .iter()
            .find(|cell| cell.organism == organism && cell.antibiotic == antibiotic)
    }

    /// Status of a pair; absent pairs report insufficient data rather than 0%.
    pub fn status(&self, organism: &str, antibiotic: &str) -> CellStatus {
        self.cell(organism, antibiotic)
            .map_or(CellStatus::InsufficientData, AggregateCell::status)
    }

    pub fn organism(&self, organism: &str) -> Option<&OrganismSummary> {
        self.organisms.iter().find(|summary| summary.organism == organism)
    }

    /// Distinct antibiotics across all cells, sorted.
    pub fn antibiotics(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cells.iter().map(|cell| cell.antibiotic.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn contains_antibiotic(&self, antibiotic: &str) -> bool {
        self.cells.iter().any(|cell| cell.antibiotic == antibiotic)
    }
}

/// Headline figures for a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOverview {
    pub isolates: u32,
    pub organisms: usize,
    pub antibiotics: usize,
    pub cells: usize,
    /// Mean of the cell percentages, rounded half-up to one decimal.
    pub mean_percent_susceptible: Option<f64>,
}
