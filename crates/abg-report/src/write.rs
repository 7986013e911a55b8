use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use abg_model::{AggregateTable, AntibiogramReport};

use crate::csv_export::{issues_to_csv, table_to_csv};
use crate::json::write_json;

pub const REPORT_FILE: &str = "antibiogram.json";

/// Lowercase ASCII file-name fragment, words joined by `_`.
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write the JSON report, one CSV per table, and the issue list into `dir`.
///
/// Returns the written paths in write order.
pub fn write_outputs(report: &AntibiogramReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut written = Vec::new();

    let json_path = dir.join(REPORT_FILE);
    write_json(report, &json_path)?;
    written.push(json_path);

    written.push(write_table(dir, "overall.csv", &report.overall)?);
    for stratum in &report.specimen_strata {
        let base = format!("specimen_{}_{}", stratum.rank, slug(&stratum.specimen_type));
        written.push(write_table(dir, &format!("{base}.csv"), &stratum.combined.table)?);
        for class_table in stratum.by_class.iter().filter(|table| !table.insufficient_data) {
            let name = format!("{base}_{}.csv", slug(&class_table.name()));
            written.push(write_table(dir, &name, &class_table.table)?);
        }
    }
    for stratum in &report.taxonomic_strata {
        let name = format!("class_{}.csv", slug(&stratum.name()));
        written.push(write_table(dir, &name, &stratum.table)?);
    }

    let issues_path = dir.join("issues.csv");
    fs::write(&issues_path, issues_to_csv(&report.metadata.issues)?)
        .with_context(|| format!("write {}", issues_path.display()))?;
    written.push(issues_path);

    info!(dir = %dir.display(), files = written.len(), "outputs written");
    Ok(written)
}

fn write_table(dir: &Path, name: &str, table: &AggregateTable) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, table_to_csv(table)?).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
