//! Analysis period policy used to scope the first-isolate rule.

use std::fmt;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// How collection dates are bucketed into analysis periods.
///
/// Institutions report on different cadences, so the boundary is
/// configuration rather than a constant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPeriod {
    /// The whole batch is a single period.
    Report,
    #[default]
    CalendarYear,
    CalendarQuarter,
    CalendarMonth,
    /// Consecutive windows of `days` days aligned on `anchor`.
    RollingDays { days: u32, anchor: NaiveDate },
}

impl AnalysisPeriod {
    /// Period containing the given collection date.
    pub fn key_for(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Self::Report => PeriodKey::Report,
            Self::CalendarYear => PeriodKey::Year { year: date.year() },
            Self::CalendarQuarter => PeriodKey::Quarter {
                year: date.year(),
                quarter: date.month0() / 3 + 1,
            },
            Self::CalendarMonth => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Self::RollingDays { days, anchor } => {
                let width = i64::from((*days).max(1));
                let offset = (date - *anchor).num_days();
                let index = offset.div_euclid(width);
                let start = anchor
                    .checked_add_signed(TimeDelta::days(index * width))
                    .unwrap_or(date);
                let end = start
                    .checked_add_signed(TimeDelta::days(width - 1))
                    .unwrap_or(start);
                PeriodKey::Window { start, end }
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Report => "report".to_string(),
            Self::CalendarYear => "calendar year".to_string(),
            Self::CalendarQuarter => "calendar quarter".to_string(),
            Self::CalendarMonth => "calendar month".to_string(),
            Self::RollingDays { days, anchor } => format!("{days}-day windows from {anchor}"),
        }
    }
}

/// Concrete analysis period an isolate belongs to.
///
/// `Undated` sorts after every dated period.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodKey {
    Report,
    Year { year: i32 },
    Quarter { year: i32, quarter: u32 },
    Month { year: i32, month: u32 },
    Window { start: NaiveDate, end: NaiveDate },
    Undated,
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => f.write_str("report"),
            Self::Year { year } => write!(f, "{year}"),
            Self::Quarter { year, quarter } => write!(f, "{year}-Q{quarter}"),
            Self::Month { year, month } => write!(f, "{year}-{month:02}"),
            Self::Window { start, end } => write!(f, "{start}..{end}"),
            Self::Undated => f.write_str("undated"),
        }
    }
}
