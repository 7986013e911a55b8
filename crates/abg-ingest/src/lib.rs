//! Input loading for antibiogram source tables.
//!
//! Both inputs are header-first CSV files read as plain strings. Column
//! resolution is case-insensitive so exports with inconsistent header
//! casing still map onto the configured column names.

pub mod csv_table;
pub mod error;
pub mod fingerprint;
pub mod frame;

pub use csv_table::{CsvTable, parse_csv_bytes, read_csv_table};
pub use error::{IngestError, Result};
pub use fingerprint::{read_source, sha256_hex};
pub use frame::{any_to_string, format_numeric, table_from_frame};
