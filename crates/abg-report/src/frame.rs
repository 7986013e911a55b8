//! Aggregate tables as polars DataFrames.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use abg_model::AggregateTable;

/// Long format: one row per cell, same columns as the CSV export.
pub fn table_to_frame(table: &AggregateTable) -> Result<DataFrame> {
    let cells = &table.cells;
    let columns = vec![
        Series::new(
            "organism".into(),
            cells.iter().map(|c| c.organism.as_str()).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "antibiotic".into(),
            cells.iter().map(|c| c.antibiotic.as_str()).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new("tested".into(), cells.iter().map(|c| c.tested).collect::<Vec<_>>())
            .into_column(),
        Series::new(
            "susceptible".into(),
            cells.iter().map(|c| c.susceptible).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "intermediate".into(),
            cells.iter().map(|c| c.intermediate).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "resistant".into(),
            cells.iter().map(|c| c.resistant).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "percent_susceptible".into(),
            cells
                .iter()
                .map(|c| c.percent_susceptible)
                .collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "low_count".into(),
            cells.iter().map(|c| c.low_count).collect::<Vec<_>>(),
        )
        .into_column(),
    ];
    DataFrame::new(columns).context("build aggregate frame")
}

/// Wide format: organisms down, antibiotics across, %susceptible in each cell.
///
/// Untested pairs are null, never zero.
pub fn table_to_matrix(table: &AggregateTable) -> Result<DataFrame> {
    let organisms: Vec<&str> = table
        .organisms
        .iter()
        .map(|summary| summary.organism.as_str())
        .collect();
    let isolates: Vec<u32> = organisms
        .iter()
        .map(|organism| table.organism(organism).map_or(0, |summary| summary.isolates))
        .collect();

    let mut columns: Vec<Column> = vec![
        Series::new("organism".into(), organisms.clone()).into_column(),
        Series::new("isolates".into(), isolates).into_column(),
    ];
    for antibiotic in table.antibiotics() {
        let values: Vec<Option<f64>> = organisms
            .iter()
            .map(|organism| {
                table
                    .cell(organism, antibiotic)
                    .and_then(|cell| cell.percent_susceptible)
            })
            .collect();
        columns.push(Series::new(antibiotic.into(), values).into_column());
    }
    DataFrame::new(columns).context("build antibiogram matrix")
}
