//! Isolate records before and after CLSI M39 deduplication.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::period::PeriodKey;

/// Interpreted AST result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Interpretation {
    #[serde(rename = "S")]
    Susceptible,
    #[serde(rename = "I")]
    Intermediate,
    #[serde(rename = "R")]
    Resistant,
}

impl Interpretation {
    /// Single-letter code used in exports.
    pub fn code(self) -> &'static str {
        match self {
            Self::Susceptible => "S",
            Self::Intermediate => "I",
            Self::Resistant => "R",
        }
    }

    pub fn is_susceptible(self) -> bool {
        matches!(self, Self::Susceptible)
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One organism recovered from one specimen event, with its AST panel.
///
/// Antibiotics absent from `results` were not tested on this isolate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolateTest {
    /// Zero-based row index in the isolates table; the stable input order.
    pub source_row: usize,
    /// Specimen/accession key shared with the AST table.
    pub accession: String,
    pub patient_id: String,
    pub organism: String,
    pub specimen_type: String,
    /// Collection timestamp; `None` when blank or unparseable.
    pub collected_at: Option<NaiveDateTime>,
    /// Antibiotic name to interpreted result.
    pub results: BTreeMap<String, Interpretation>,
}

impl IsolateTest {
    pub fn collection_date(&self) -> Option<NaiveDate> {
        self.collected_at.map(|value| value.date())
    }

    pub fn result_for(&self, antibiotic: &str) -> Option<Interpretation> {
        self.results.get(antibiotic).copied()
    }

    pub fn tested_count(&self) -> usize {
        self.results.len()
    }
}

/// The single isolate retained for a (patient, organism, period) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduplicatedIsolate {
    pub period: PeriodKey,
    pub isolate: IsolateTest,
    /// Number of repeat isolates of the same triple that were discarded.
    pub superseded: usize,
}

impl DeduplicatedIsolate {
    pub fn patient_id(&self) -> &str {
        &self.isolate.patient_id
    }

    pub fn organism(&self) -> &str {
        &self.isolate.organism
    }

    pub fn specimen_type(&self) -> &str {
        &self.isolate.specimen_type
    }
}
