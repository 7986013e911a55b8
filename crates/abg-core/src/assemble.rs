//! Shape assembly of the final report. Nothing is recomputed here.

use abg_model::{
    AggregateTable, AnalysisPeriod, AntibiogramReport, ReportMetadata, RowIssue,
    SourceFingerprint, TableOverview,
};

use crate::dedupe::DedupStats;
use crate::normalize::NormalizeStats;
use crate::stratify::{ClassStrata, SpecimenStrata};

/// Outputs of every stage, moved into the report as-is.
#[derive(Debug, Clone)]
pub struct ReportParts {
    pub normalize: NormalizeStats,
    pub dedup: DedupStats,
    pub analysis_period: AnalysisPeriod,
    pub overview: TableOverview,
    pub overall: AggregateTable,
    pub specimens: SpecimenStrata,
    pub classes: ClassStrata,
    /// Row issues in stage order.
    pub issues: Vec<RowIssue>,
    pub sources: Vec<SourceFingerprint>,
}

pub fn assemble(parts: ReportParts) -> AntibiogramReport {
    let ReportParts {
        normalize,
        dedup,
        analysis_period,
        overview,
        overall,
        specimens,
        classes,
        issues,
        sources,
    } = parts;

    let mut dropped_reasons = normalize.dropped_reasons;
    if dedup.undated_excluded > 0 {
        *dropped_reasons
            .entry("undated_excluded".to_string())
            .or_default() += dedup.undated_excluded;
    }

    let metadata = ReportMetadata {
        total_rows_in: normalize.isolate_rows_in,
        ast_rows_in: normalize.ast_rows_in,
        isolates_normalized: normalize.isolates_retained,
        total_after_dedup: dedup.retained,
        repeat_isolates_removed: dedup.repeats_removed,
        rows_dropped: normalize.isolate_rows_dropped
            + normalize.ast_rows_dropped
            + dedup.undated_excluded,
        dropped_reasons,
        date_range: normalize.date_range,
        undated_isolates: normalize.undated,
        analysis_period,
        periods: dedup.periods,
        unclassified_organisms: classes.unclassified,
        other_specimen_isolates: specimens.other_isolates,
        issues,
        sources,
    };

    AntibiogramReport {
        metadata,
        overview,
        overall,
        specimen_strata: specimens.strata,
        taxonomic_strata: classes.strata,
    }
}
