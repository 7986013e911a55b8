//! Rendering for assembled antibiograms.
//!
//! Reads an [`abg_model::AntibiogramReport`] and never reaches back into the
//! engine. Outputs are JSON, per-table CSV, polars frames, and comfy-table
//! summaries for terminals.

pub mod csv_export;
pub mod frame;
pub mod json;
pub mod summary;
pub mod write;

pub use csv_export::{ISSUE_COLUMNS, TABLE_COLUMNS, issues_to_csv, table_to_csv};
pub use frame::{table_to_frame, table_to_matrix};
pub use json::{report_to_json, write_json};
pub use summary::{render_summary, render_table};
pub use write::{REPORT_FILE, slug, write_outputs};
