//! Polars interop for callers that already hold a `DataFrame`.

use polars::prelude::*;

use crate::csv_table::CsvTable;
use crate::error::Result;

/// Render a cell as text. Null becomes empty; floats lose trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Format a float without trailing fractional zeros (`12.0` -> `12`).
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Convert a frame into a [`CsvTable`], stringifying every cell.
///
/// Accession numbers read by Polars as floats come back as `12345`, not
/// `12345.0`, so joins against string-typed tables still match.
pub fn table_from_frame(df: &DataFrame) -> Result<CsvTable> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut columns = Vec::with_capacity(headers.len());
    for name in &headers {
        columns.push(df.column(name.as_str())?);
    }
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in &columns {
            row.push(any_to_string(column.get(idx)?));
        }
        rows.push(row);
    }
    Ok(CsvTable::new(headers, rows))
}
