use std::path::Path;

use anyhow::{Context, Result};

use abg_model::AntibiogramReport;

/// Pretty-printed JSON of the whole report.
pub fn report_to_json(report: &AntibiogramReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize antibiogram report")
}

pub fn write_json(report: &AntibiogramReport, path: &Path) -> Result<()> {
    let json = report_to_json(report)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
