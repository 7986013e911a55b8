//! CLSI M39 first-isolate deduplication.
//!
//! Isolates are grouped by (patient, organism, analysis period) and only the
//! earliest isolate of each group is kept. The survivor keeps its whole AST
//! panel; results from superseded isolates are never merged in.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use tracing::debug;

use abg_model::{
    DedupOptions, DeduplicatedIsolate, IsolateTest, MissingDatePolicy, PeriodKey, RowError,
    RowIssue, SourceTable, TieBreak,
};

use crate::logging::redact_value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub input: usize,
    pub retained: usize,
    pub repeats_removed: usize,
    /// Undated isolates that took part in grouping.
    pub undated_flagged: usize,
    /// Undated isolates dropped under [`MissingDatePolicy::Exclude`].
    pub undated_excluded: usize,
    /// Period labels present among survivors, in period order.
    pub periods: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Deduplication {
    /// Survivors ordered by their isolates-table row.
    pub isolates: Vec<DeduplicatedIsolate>,
    pub issues: Vec<RowIssue>,
    pub stats: DedupStats,
}

type GroupKey = (String, String, PeriodKey);
type Rank = (bool, Option<NaiveDateTime>, Reverse<usize>, usize);

/// Ordering key; the smallest wins. Undated isolates sort after every date.
fn rank(isolate: &IsolateTest, tie_break: TieBreak) -> Rank {
    let completeness = match tie_break {
        TieBreak::FirstSeen => 0,
        TieBreak::MostComplete => isolate.tested_count(),
    };
    (
        isolate.collected_at.is_none(),
        isolate.collected_at,
        Reverse(completeness),
        isolate.source_row,
    )
}

/// Keep the first isolate per (patient, organism, period).
///
/// An undated isolate joins the latest dated period of its (patient, organism)
/// pair, or an `Undated` period when the pair has no dated isolate.
pub fn deduplicate(isolates: &[IsolateTest], options: &DedupOptions) -> Deduplication {
    let mut issues = Vec::new();
    let mut stats = DedupStats {
        input: isolates.len(),
        ..DedupStats::default()
    };

    let mut latest: BTreeMap<(&str, &str), PeriodKey> = BTreeMap::new();
    for isolate in isolates {
        if let Some(date) = isolate.collection_date() {
            let key = options.period.key_for(date);
            let pair = (isolate.patient_id.as_str(), isolate.organism.as_str());
            match latest.get_mut(&pair) {
                Some(current) if *current >= key => {}
                Some(current) => *current = key,
                None => {
                    latest.insert(pair, key);
                }
            }
        }
    }

    let mut groups: BTreeMap<GroupKey, Vec<&IsolateTest>> = BTreeMap::new();
    for isolate in isolates {
        let period = match isolate.collection_date() {
            Some(date) => options.period.key_for(date),
            None if options.missing_dates == MissingDatePolicy::Exclude => {
                stats.undated_excluded += 1;
                issues.push(RowIssue::at(
                    SourceTable::Isolates,
                    isolate.source_row,
                    RowError::UndatedExcluded,
                ));
                continue;
            }
            None => {
                stats.undated_flagged += 1;
                latest
                    .get(&(isolate.patient_id.as_str(), isolate.organism.as_str()))
                    .cloned()
                    .unwrap_or(PeriodKey::Undated)
            }
        };
        groups
            .entry((isolate.patient_id.clone(), isolate.organism.clone(), period))
            .or_default()
            .push(isolate);
    }

    let mut survivors = Vec::with_capacity(groups.len());
    let mut periods = BTreeSet::new();
    for ((patient, organism, period), members) in groups {
        let Some(winner) = members
            .iter()
            .copied()
            .min_by_key(|isolate| rank(isolate, options.tie_break))
        else {
            continue;
        };
        let superseded = members.len() - 1;
        if superseded > 0 {
            debug!(
                patient = redact_value(&patient),
                organism = %organism,
                period = %period,
                kept_row = winner.source_row + 1,
                superseded,
                "repeat isolates collapsed"
            );
        }
        periods.insert(period.clone());
        survivors.push(DeduplicatedIsolate {
            period,
            isolate: winner.clone(),
            superseded,
        });
    }
    survivors.sort_by_key(|survivor| survivor.isolate.source_row);

    stats.retained = survivors.len();
    stats.repeats_removed = stats.input - stats.undated_excluded - stats.retained;
    stats.periods = periods.iter().map(ToString::to_string).collect();

    Deduplication {
        isolates: survivors,
        issues,
        stats,
    }
}
