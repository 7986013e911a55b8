//! Collection date parsing for laboratory exports.

use chrono::{NaiveDate, NaiveDateTime};

/// Time specifiers that mark a chrono format as carrying a time of day.
const TIME_SPECIFIERS: &[&str] = &["%H", "%I", "%M", "%S", "%T", "%R", "%X", "%r"];

/// Parses collection dates against an ordered list of chrono formats.
///
/// Formats with a time component are tried before date-only formats, each
/// group in configured order. Date-only matches are placed at midnight.
#[derive(Debug, Clone)]
pub struct DateParser {
    datetime_formats: Vec<String>,
    date_formats: Vec<String>,
}

impl DateParser {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (datetime_formats, date_formats) = formats
            .into_iter()
            .map(|format| format.as_ref().trim().to_string())
            .filter(|format| !format.is_empty())
            .partition(|format| has_time_component(format));
        Self {
            datetime_formats,
            date_formats,
        }
    }

    /// Parse a non-blank value, `None` when no format matches.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        self.datetime_formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .or_else(|| {
                self.date_formats.iter().find_map(|format| {
                    NaiveDate::parse_from_str(value, format)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
            })
    }
}

fn has_time_component(format: &str) -> bool {
    TIME_SPECIFIERS
        .iter()
        .any(|specifier| format.contains(specifier))
}
