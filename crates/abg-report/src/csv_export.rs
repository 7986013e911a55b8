//! Flat CSV exports of aggregate tables and the issue audit list.

use anyhow::{Context, Result, anyhow};
use csv::{Terminator, WriterBuilder};

use abg_model::{AggregateTable, RowIssue};

pub const TABLE_COLUMNS: [&str; 8] = [
    "organism",
    "antibiotic",
    "tested",
    "susceptible",
    "intermediate",
    "resistant",
    "percent_susceptible",
    "low_count",
];

pub const ISSUE_COLUMNS: [&str; 4] = ["table", "row", "reason", "message"];

/// One line per organism/antibiotic cell, percent to one decimal.
pub fn table_to_csv(table: &AggregateTable) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(TABLE_COLUMNS)?;
    for cell in &table.cells {
        let percent = cell
            .percent_susceptible
            .map(|value| format!("{value:.1}"))
            .unwrap_or_default();
        writer.write_record([
            cell.organism.clone(),
            cell.antibiotic.clone(),
            cell.tested.to_string(),
            cell.susceptible.to_string(),
            cell.intermediate.to_string(),
            cell.resistant.to_string(),
            percent,
            cell.low_count.to_string(),
        ])?;
    }
    finish(writer)
}

/// Audit list with one-based row numbers; blank for table-level notices.
pub fn issues_to_csv(issues: &[RowIssue]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(ISSUE_COLUMNS)?;
    for issue in issues {
        writer.write_record([
            issue.table.as_ref().map(ToString::to_string).unwrap_or_default(),
            issue.row.map(|row| (row + 1).to_string()).unwrap_or_default(),
            issue.error.reason(),
            issue.error.to_string(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush CSV writer: {}", err.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
