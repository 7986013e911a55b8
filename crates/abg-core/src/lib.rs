//! Cumulative antibiogram engine.
//!
//! The pipeline runs in five stages over an in-memory batch:
//!
//! 1. **normalize**: schema check, typing, isolate/AST join
//! 2. **dedupe**: CLSI M39 first isolate per patient, organism, and period
//! 3. **aggregate**: %susceptible per organism and antibiotic
//! 4. **stratify**: dominant specimen types and organism classes
//! 5. **assemble**: one [`abg_model::AntibiogramReport`]
//!
//! [`build_antibiogram`] runs all of them; each stage is also public.

pub mod aggregate;
pub mod assemble;
pub mod config;
pub mod datetime;
pub mod dedupe;
pub mod error;
pub mod interpretation;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod stratify;

pub use aggregate::{AntibioticPanel, aggregate, summarize};
pub use assemble::{ReportParts, assemble};
pub use config::{AntibiogramConfig, load_config, parse_config, validate_options};
pub use datetime::DateParser;
pub use dedupe::{DedupStats, Deduplication, deduplicate};
pub use error::{ConfigError, PipelineError};
pub use interpretation::{InterpretationMap, ResultValue};
pub use logging::{
    LogConfig, LogFormat, LogLevel, REDACTED_VALUE, init_logging, init_logging_with_writer,
    redact_value,
};
pub use normalize::{NormalizeStats, Normalized, canonical_accession, normalize};
pub use pipeline::{build_antibiogram, run_from_paths};
pub use stratify::{
    ClassStrata, SpecimenRanking, SpecimenStrata, rank_specimen_types, stratify_by_class,
    stratify_by_specimen,
};
