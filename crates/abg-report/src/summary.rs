//! Terminal rendering with comfy-table.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use abg_model::{AggregateCell, AggregateTable, AntibiogramReport, StratumTable};

/// Overview, metadata, and per-stratum status as printable tables.
pub fn render_summary(report: &AntibiogramReport) -> String {
    let mut sections = vec![
        overview_table(report).to_string(),
        strata_table(report).to_string(),
    ];
    if !report.metadata.dropped_reasons.is_empty() {
        sections.push(dropped_table(report).to_string());
    }
    sections.join("\n")
}

/// Organisms down, antibiotics across, `%S (N)` in each tested cell.
pub fn render_table(table: &AggregateTable) -> Table {
    let antibiotics = table.antibiotics();
    let mut rendered = Table::new();
    let mut header = vec![header_cell("Organism"), header_cell("Isolates")];
    header.extend(antibiotics.iter().map(|name| header_cell(name)));
    rendered.set_header(header);
    apply_table_style(&mut rendered);
    for index in 1..=antibiotics.len() + 1 {
        align_column(&mut rendered, index, CellAlignment::Right);
    }

    for summary in &table.organisms {
        let mut row = vec![
            Cell::new(&summary.organism).add_attribute(Attribute::Italic),
            Cell::new(summary.isolates),
        ];
        row.extend(
            antibiotics
                .iter()
                .map(|antibiotic| percent_cell(table.cell(&summary.organism, antibiotic))),
        );
        rendered.add_row(row);
    }
    rendered
}

fn overview_table(report: &AntibiogramReport) -> Table {
    let metadata = &report.metadata;
    let overview = &report.overview;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Summary"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let date_range = metadata.date_range.map_or_else(
        || "-".to_string(),
        |range| format!("{} to {}", range.start, range.end),
    );
    let mean = overview
        .mean_percent_susceptible
        .map_or_else(|| "-".to_string(), |value| format!("{value:.1}%"));
    let rows: Vec<(&str, String)> = vec![
        ("Isolate rows in", metadata.total_rows_in.to_string()),
        ("AST rows in", metadata.ast_rows_in.to_string()),
        ("Rows dropped", metadata.rows_dropped.to_string()),
        ("Isolates after dedup", metadata.total_after_dedup.to_string()),
        ("Repeat isolates removed", metadata.repeat_isolates_removed.to_string()),
        ("Analysis period", metadata.analysis_period.label()),
        ("Date range", date_range),
        ("Undated isolates", metadata.undated_isolates.to_string()),
        ("Organisms", overview.organisms.to_string()),
        ("Antibiotics", overview.antibiotics.to_string()),
        ("Mean %S", mean),
        ("Issues", metadata.issue_count().to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

fn strata_table(report: &AntibiogramReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stratum"),
        header_cell("Isolates"),
        header_cell("Organisms"),
        header_cell("Antibiotics"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for stratum in &report.specimen_strata {
        let label = format!("#{} {}", stratum.rank, stratum.specimen_type);
        table.add_row(stratum_row(&stratum.combined, &label));
    }
    if report.metadata.other_specimen_isolates > 0 {
        table.add_row(vec![
            dim_cell("Other specimens"),
            dim_cell(report.metadata.other_specimen_isolates),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("not reported"),
        ]);
    }
    for stratum in &report.taxonomic_strata {
        table.add_row(stratum_row(stratum, &stratum.name()));
    }
    table
}

fn stratum_row(stratum: &StratumTable, label: &str) -> Vec<Cell> {
    let status = if stratum.insufficient_data {
        Cell::new("insufficient data").fg(Color::Yellow)
    } else {
        Cell::new("reported").fg(Color::Green)
    };
    vec![
        Cell::new(label)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(stratum.isolates),
        Cell::new(stratum.table.organisms.len()),
        Cell::new(stratum.table.antibiotics().len()),
        status,
    ]
}

fn dropped_table(report: &AntibiogramReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dropped"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, count) in &report.metadata.dropped_reasons {
        table.add_row(vec![Cell::new(reason), Cell::new(count).fg(Color::Yellow)]);
    }
    table
}

fn percent_cell(cell: Option<&AggregateCell>) -> Cell {
    match cell.and_then(|cell| cell.percent_susceptible.map(|percent| (percent, cell))) {
        Some((percent, cell)) => {
            let text = Cell::new(format!("{percent:.1} ({})", cell.tested));
            if cell.low_count {
                text.fg(Color::DarkGrey)
            } else {
                text
            }
        }
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
