//! Configuration options for antibiogram processing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::isolate::Interpretation;
use crate::period::AnalysisPeriod;
use crate::taxonomy::Taxonomy;

/// Column names in the isolates-per-specimen table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolateColumns {
    pub accession: String,
    pub patient: String,
    pub organism: String,
    pub specimen_type: String,
    pub collected_on: String,
}

impl Default for IsolateColumns {
    fn default() -> Self {
        Self {
            accession: "Specimen".to_string(),
            patient: "Patient".to_string(),
            organism: "Organism".to_string(),
            specimen_type: "Sample Type".to_string(),
            collected_on: "Created on".to_string(),
        }
    }
}

impl IsolateColumns {
    pub fn required(&self) -> [&str; 5] {
        [
            self.accession.as_str(),
            self.patient.as_str(),
            self.organism.as_str(),
            self.specimen_type.as_str(),
            self.collected_on.as_str(),
        ]
    }
}

/// Column names in the AST results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstColumns {
    pub accession: String,
    pub antibiotic: String,
    pub interpretation: String,
    /// Optional organism column used to disambiguate polymicrobial specimens.
    pub organism: Option<String>,
}

impl Default for AstColumns {
    fn default() -> Self {
        Self {
            accession: "Specimen".to_string(),
            antibiotic: "Antimicrobial".to_string(),
            interpretation: "Interpretation".to_string(),
            organism: None,
        }
    }
}

impl AstColumns {
    pub fn required(&self) -> Vec<&str> {
        let mut columns = vec![
            self.accession.as_str(),
            self.antibiotic.as_str(),
            self.interpretation.as_str(),
        ];
        if let Some(organism) = &self.organism {
            columns.push(organism.as_str());
        }
        columns
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub isolates: IsolateColumns,
    pub ast: AstColumns,
}

/// Treatment of isolates without a usable collection date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDatePolicy {
    /// Order them after every dated isolate of the same group.
    #[default]
    SortLast,
    /// Drop them before deduplication.
    Exclude,
}

/// Winner among isolates sharing the earliest collection date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First row in input order.
    #[default]
    FirstSeen,
    /// Most reported results, then first row in input order.
    MostComplete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    pub period: AnalysisPeriod,
    pub missing_dates: MissingDatePolicy,
    pub tie_break: TieBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StratificationOptions {
    /// Number of specimen types that get dedicated tables.
    pub top_specimens: usize,
    /// Cells tested on fewer isolates are flagged `low_count`; 0 disables.
    pub min_isolates: u32,
}

impl Default for StratificationOptions {
    fn default() -> Self {
        Self {
            top_specimens: 5,
            min_isolates: 30,
        }
    }
}

pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
    "%d-%b-%Y",
];

/// Everything the engine needs besides the two input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntibiogramOptions {
    pub columns: ColumnMapping,
    pub dedup: DedupOptions,
    pub stratification: StratificationOptions,
    pub taxonomy: Taxonomy,
    /// Extra raw result codes (matched case-insensitively) and their category.
    pub interpretations: BTreeMap<String, Interpretation>,
    /// chrono formats tried in order when parsing collection dates.
    pub date_formats: Vec<String>,
}

impl Default for AntibiogramOptions {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            dedup: DedupOptions::default(),
            stratification: StratificationOptions::default(),
            taxonomy: Taxonomy::default(),
            interpretations: BTreeMap::new(),
            date_formats: DEFAULT_DATE_FORMATS
                .iter()
                .map(|format| (*format).to_string())
                .collect(),
        }
    }
}

impl AntibiogramOptions {
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }
}
