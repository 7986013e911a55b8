//! Antibiogram data model.
//!
//! Types shared by the ingest, core, and report crates:
//!
//! - **isolate**: normalized isolates and their deduplicated survivors
//! - **period**: analysis period policy and period keys
//! - **aggregate**: susceptibility cells, tables, and rounding
//! - **stratum**: specimen and organism-class partitions
//! - **taxonomy**: organism classes and antifungal agents
//! - **report**: the assembled output object
//! - **error**: row-level issues and the fatal schema error

pub mod aggregate;
pub mod error;
pub mod isolate;
pub mod lookup;
pub mod options;
pub mod period;
pub mod report;
pub mod stratum;
pub mod taxonomy;

pub use aggregate::{
    AggregateCell, AggregateTable, CellStatus, OrganismSummary, ResultCounts, TableOverview,
    percent_susceptible, percent_tenths,
};
pub use error::{MissingColumn, RequiredField, RowError, RowIssue, SchemaError, SourceTable};
pub use isolate::{DeduplicatedIsolate, Interpretation, IsolateTest};
pub use lookup::{CaseInsensitiveMap, CaseInsensitiveSet, canonical_name, lookup_key};
pub use options::{
    AntibiogramOptions, AstColumns, ColumnMapping, DEFAULT_DATE_FORMATS, DedupOptions,
    IsolateColumns, MissingDatePolicy, StratificationOptions, TieBreak,
};
pub use period::{AnalysisPeriod, PeriodKey};
pub use report::{AntibiogramReport, DateRange, ReportMetadata, SourceFingerprint};
pub use stratum::{OrganismClass, SpecimenStratum, Stratum, StratumTable};
pub use taxonomy::{OrganismClassifier, Taxonomy};
