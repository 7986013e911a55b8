use std::path::Path;

use csv::ReaderBuilder;

use abg_model::{canonical_name, lookup_key};

use crate::error::{IngestError, Result};

/// A raw input table: one header row plus string cells.
///
/// Every row holds exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl CsvTable {
    /// Build a table from in-memory values, padding short rows.
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| canonical_name(header.as_ref()))
            .collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row
                    .into_iter()
                    .take(width)
                    .map(|cell| normalize_cell(cell.as_ref()))
                    .collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header, matched case-insensitively with whitespace collapsed.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let key = lookup_key(name);
        self.headers
            .iter()
            .position(|header| lookup_key(header) == key)
    }

    /// Required columns that have no matching header, in the order given.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect()
    }

    /// Cell value, empty when the row or column is out of range.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

/// Parse CSV bytes. The first non-blank row is the header; blank rows are skipped.
pub fn parse_csv_bytes(bytes: &[u8], path: &Path) -> Result<CsvTable> {
    if bytes.len() >= 2 && (bytes[0..2] == [0xFF, 0xFE] || bytes[0..2] == [0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16",
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if headers.is_none() {
            headers = Some(record.iter().map(canonical_name).collect());
            continue;
        }
        let width = headers.as_ref().map_or(0, Vec::len);
        let mut row: Vec<String> = record.iter().take(width).map(normalize_cell).collect();
        row.resize(width, String::new());
        rows.push(row);
    }
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let bytes = std::fs::read(path).map_err(|error| IngestError::read(path, error))?;
    parse_csv_bytes(&bytes, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pads_and_truncates_rows() {
        let table = CsvTable::new(["A", "B"], vec![vec!["1"], vec!["1", "2", "3"]]);
        assert_eq!(table.rows[0], vec!["1", ""]);
        assert_eq!(table.rows[1], vec!["1", "2"]);
    }

    #[test]
    fn column_lookup_ignores_case_and_spacing() {
        let table = CsvTable::new(["Sample  Type", "Created on"], Vec::<Vec<&str>>::new());
        assert_eq!(table.column_index("sample type"), Some(0));
        assert_eq!(table.column_index("CREATED ON"), Some(1));
        assert_eq!(
            table.missing_columns(&["Patient", "Created on"]),
            vec!["Patient"]
        );
    }
}
