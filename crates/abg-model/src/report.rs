//! The assembled antibiogram handed to rendering.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateTable, TableOverview};
use crate::error::{RowIssue, SourceTable};
use crate::period::AnalysisPeriod;
use crate::stratum::{OrganismClass, SpecimenStratum, Stratum, StratumTable};

/// Inclusive range of collection dates covered by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn include(&mut self, date: NaiveDate) {
        if date < self.start {
            self.start = date;
        }
        if date > self.end {
            self.end = date;
        }
    }
}

/// Identity of an input file the report was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    pub table: SourceTable,
    pub path: String,
    pub rows: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Data rows read from the isolates table.
    pub total_rows_in: usize,
    /// Data rows read from the AST table.
    pub ast_rows_in: usize,
    /// Isolates that passed validation.
    pub isolates_normalized: usize,
    pub total_after_dedup: usize,
    pub repeat_isolates_removed: usize,
    /// Rows removed from either table, with per-reason tallies.
    pub rows_dropped: usize,
    pub dropped_reasons: BTreeMap<String, usize>,
    pub date_range: Option<DateRange>,
    /// Retained isolates that had no usable collection date.
    pub undated_isolates: usize,
    pub analysis_period: AnalysisPeriod,
    /// Labels of the periods present after deduplication.
    pub periods: Vec<String>,
    pub unclassified_organisms: Vec<String>,
    /// Deduplicated isolates outside the dominant specimen types.
    pub other_specimen_isolates: u32,
    pub issues: Vec<RowIssue>,
    pub sources: Vec<SourceFingerprint>,
}

impl ReportMetadata {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Complete, internally consistent antibiogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntibiogramReport {
    pub metadata: ReportMetadata,
    pub overview: TableOverview,
    pub overall: AggregateTable,
    pub specimen_strata: Vec<SpecimenStratum>,
    pub taxonomic_strata: Vec<StratumTable>,
}

impl AntibiogramReport {
    pub fn specimen(&self, specimen_type: &str) -> Option<&SpecimenStratum> {
        self.specimen_strata
            .iter()
            .find(|stratum| stratum.specimen_type == specimen_type)
    }

    pub fn class(&self, class: OrganismClass) -> Option<&StratumTable> {
        self.taxonomic_strata
            .iter()
            .find(|table| table.stratum == Stratum::Class(class))
    }
}
