//! TOML configuration for the engine and its logging.
//!
//! Every section is optional, so an empty file yields the defaults:
//!
//! ```toml
//! date_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"]
//!
//! [columns.isolates]
//! patient = "Patient ID"
//!
//! [dedup]
//! period = { kind = "rolling_days", days = 365, anchor = "2024-01-01" }
//! missing_dates = "sort_last"
//! tie_break = "first_seen"
//!
//! [stratification]
//! top_specimens = 5
//! min_isolates = 30
//!
//! [interpretations]
//! "S-DD" = "I"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```
//!
//! The rolling window anchor must be a quoted string; bare TOML dates are not
//! accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use abg_model::{AnalysisPeriod, AntibiogramOptions};

use crate::error::ConfigError;
use crate::logging::LogConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntibiogramConfig {
    #[serde(flatten)]
    pub options: AntibiogramOptions,
    pub logging: LogConfig,
}

pub fn load_config(path: &Path) -> Result<AntibiogramConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let config: AntibiogramConfig = toml::from_str(&contents).map_err(|e| ConfigError::Toml {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate_options(&config.options)?;
    Ok(config)
}

/// Parse and validate a config held in memory.
pub fn parse_config(contents: &str) -> Result<AntibiogramConfig, ConfigError> {
    let config: AntibiogramConfig = toml::from_str(contents).map_err(|e| ConfigError::Toml {
        path: "<inline>".into(),
        source: e,
    })?;
    validate_options(&config.options)?;
    Ok(config)
}

/// Reject option values the engine cannot run with.
pub fn validate_options(options: &AntibiogramOptions) -> Result<(), ConfigError> {
    if let AnalysisPeriod::RollingDays { days: 0, .. } = options.dedup.period {
        return Err(ConfigError::invalid("dedup.period.days must be at least 1"));
    }
    if options.stratification.top_specimens == 0 {
        return Err(ConfigError::invalid(
            "stratification.top_specimens must be at least 1",
        ));
    }
    if options.date_formats.iter().all(|format| format.trim().is_empty()) {
        return Err(ConfigError::invalid("date_formats must list at least one format"));
    }

    let isolates = &options.columns.isolates;
    let ast = &options.columns.ast;
    let columns = [
        ("columns.isolates.accession", isolates.accession.as_str()),
        ("columns.isolates.patient", isolates.patient.as_str()),
        ("columns.isolates.organism", isolates.organism.as_str()),
        ("columns.isolates.specimen_type", isolates.specimen_type.as_str()),
        ("columns.isolates.collected_on", isolates.collected_on.as_str()),
        ("columns.ast.accession", ast.accession.as_str()),
        ("columns.ast.antibiotic", ast.antibiotic.as_str()),
        ("columns.ast.interpretation", ast.interpretation.as_str()),
        ("columns.ast.organism", ast.organism.as_deref().unwrap_or("-")),
    ];
    if let Some((key, _)) = columns.iter().find(|(_, name)| name.trim().is_empty()) {
        return Err(ConfigError::invalid(format!("{key} must not be empty")));
    }
    Ok(())
}
