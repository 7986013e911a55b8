//! End-to-end antibiogram construction.

use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use abg_ingest::{CsvTable, read_source};
use abg_model::{AntibiogramOptions, AntibiogramReport, SourceFingerprint, SourceTable};

use crate::aggregate::{AntibioticPanel, aggregate, summarize};
use crate::assemble::{ReportParts, assemble};
use crate::config::validate_options;
use crate::dedupe::deduplicate;
use crate::error::PipelineError;
use crate::normalize::normalize;
use crate::stratify::{stratify_by_class, stratify_by_specimen};

/// Build an antibiogram from two in-memory tables.
///
/// # Errors
///
/// Fails only on invalid options or missing input columns. Row-level problems
/// are listed in `metadata.issues`.
pub fn build_antibiogram(
    isolates: &CsvTable,
    ast: &CsvTable,
    options: &AntibiogramOptions,
) -> Result<AntibiogramReport, PipelineError> {
    build_with_sources(isolates, ast, options, Vec::new())
}

/// Read both CSV files and build the antibiogram, recording file fingerprints.
pub fn run_from_paths(
    isolates_path: &Path,
    ast_path: &Path,
    options: &AntibiogramOptions,
) -> Result<AntibiogramReport, PipelineError> {
    let span = info_span!("ingest");
    let guard = span.enter();
    let start = Instant::now();
    let (isolates, isolates_source) = read_source(isolates_path, SourceTable::Isolates)?;
    let (ast, ast_source) = read_source(ast_path, SourceTable::Ast)?;
    info!(
        isolate_rows = isolates.len(),
        ast_rows = ast.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    drop(guard);
    build_with_sources(&isolates, &ast, options, vec![isolates_source, ast_source])
}

fn build_with_sources(
    isolates: &CsvTable,
    ast: &CsvTable,
    options: &AntibiogramOptions,
    sources: Vec<SourceFingerprint>,
) -> Result<AntibiogramReport, PipelineError> {
    validate_options(options)?;
    let run_span = info_span!("antibiogram");
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let normalized = {
        let span = info_span!("normalize");
        let _guard = span.enter();
        let start = Instant::now();
        let normalized = normalize(isolates, ast, options)?;
        info!(
            isolates = normalized.stats.isolates_retained,
            rows_dropped = normalized.stats.rows_dropped(),
            undated = normalized.stats.undated,
            duration_ms = start.elapsed().as_millis(),
            "normalize complete"
        );
        normalized
    };

    let dedup = {
        let span = info_span!("deduplicate");
        let _guard = span.enter();
        let start = Instant::now();
        let dedup = deduplicate(&normalized.isolates, &options.dedup);
        info!(
            retained = dedup.stats.retained,
            repeats_removed = dedup.stats.repeats_removed,
            undated_excluded = dedup.stats.undated_excluded,
            period = %options.dedup.period.label(),
            duration_ms = start.elapsed().as_millis(),
            "deduplicate complete"
        );
        dedup
    };

    let classifier = options.taxonomy.classifier();
    let min_isolates = options.stratification.min_isolates;
    let span = info_span!("aggregate");
    let guard = span.enter();
    let start = Instant::now();
    let overall = aggregate(&dedup.isolates, AntibioticPanel::All, &classifier, min_isolates);
    let overview = summarize(
        &overall,
        u32::try_from(dedup.isolates.len()).unwrap_or(u32::MAX),
    );
    let specimens = stratify_by_specimen(&dedup.isolates, &classifier, &options.stratification);
    let mut classes = stratify_by_class(&dedup.isolates, &classifier, min_isolates);
    info!(
        cells = overall.cells.len(),
        specimen_strata = specimens.strata.len(),
        unclassified = classes.unclassified.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregate complete"
    );
    drop(guard);

    let mut issues = normalized.issues;
    issues.extend(dedup.issues);
    issues.append(&mut classes.issues);

    let report = assemble(ReportParts {
        normalize: normalized.stats,
        dedup: dedup.stats,
        analysis_period: options.dedup.period.clone(),
        overview,
        overall,
        specimens,
        classes,
        issues,
        sources,
    });
    info!(
        isolates = report.metadata.total_after_dedup,
        issues = report.metadata.issue_count(),
        duration_ms = run_start.elapsed().as_millis(),
        "antibiogram complete"
    );
    Ok(report)
}
