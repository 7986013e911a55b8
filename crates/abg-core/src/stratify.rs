//! Specimen-type and organism-class stratification.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use abg_model::{
    DeduplicatedIsolate, OrganismClass, OrganismClassifier, RowError, RowIssue, SpecimenStratum,
    StratificationOptions, Stratum, StratumTable,
};

use crate::aggregate::{AntibioticPanel, aggregate};

/// Specimen types ordered by deduplicated isolate count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecimenRanking {
    /// The dominant specimen types with their isolate counts.
    pub ranked: Vec<(String, u32)>,
    /// Isolates from every specimen type outside `ranked`.
    pub other_isolates: u32,
}

/// Rank specimen types by isolate count descending, ties by name ascending.
pub fn rank_specimen_types(isolates: &[DeduplicatedIsolate], top: usize) -> SpecimenRanking {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for survivor in isolates {
        *counts.entry(survivor.specimen_type()).or_default() += 1;
    }
    let mut ordered: Vec<(&str, u32)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let split = top.min(ordered.len());
    let other_isolates = ordered[split..].iter().map(|(_, count)| count).sum();
    let ranked = ordered[..split]
        .iter()
        .map(|(name, count)| ((*name).to_string(), *count))
        .collect();
    SpecimenRanking {
        ranked,
        other_isolates,
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpecimenStrata {
    pub strata: Vec<SpecimenStratum>,
    pub other_isolates: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ClassStrata {
    /// Always Gram-negative, Gram-positive, Fungi/Yeast.
    pub strata: Vec<StratumTable>,
    pub unclassified: Vec<String>,
    pub issues: Vec<RowIssue>,
}

fn class_table<'a, I>(
    stratum: Stratum,
    isolates: I,
    class: OrganismClass,
    classifier: &OrganismClassifier,
    min_isolates: u32,
) -> StratumTable
where
    I: IntoIterator<Item = &'a DeduplicatedIsolate>,
{
    let members: Vec<&DeduplicatedIsolate> = isolates
        .into_iter()
        .filter(|survivor| classifier.classify(survivor.organism()) == Some(class))
        .collect();
    let count = u32::try_from(members.len()).unwrap_or(u32::MAX);
    let table = aggregate(
        members,
        AntibioticPanel::for_class(class),
        classifier,
        min_isolates,
    );
    StratumTable::new(stratum, count, table)
}

/// One combined table plus per-class tables for each dominant specimen type.
pub fn stratify_by_specimen(
    isolates: &[DeduplicatedIsolate],
    classifier: &OrganismClassifier,
    options: &StratificationOptions,
) -> SpecimenStrata {
    let ranking = rank_specimen_types(isolates, options.top_specimens);
    let strata = ranking
        .ranked
        .iter()
        .enumerate()
        .map(|(index, (specimen_type, count))| {
            let members: Vec<&DeduplicatedIsolate> = isolates
                .iter()
                .filter(|survivor| survivor.specimen_type() == specimen_type.as_str())
                .collect();
            let combined = StratumTable::new(
                Stratum::Specimen(specimen_type.clone()),
                *count,
                aggregate(
                    members.iter().copied(),
                    AntibioticPanel::All,
                    classifier,
                    options.min_isolates,
                ),
            );
            let by_class = OrganismClass::ALL
                .into_iter()
                .map(|class| {
                    class_table(
                        Stratum::Class(class),
                        members.iter().copied(),
                        class,
                        classifier,
                        options.min_isolates,
                    )
                })
                .collect();
            debug!(
                rank = index + 1,
                specimen_type = %specimen_type,
                isolates = count,
                "specimen stratum built"
            );
            SpecimenStratum {
                rank: index + 1,
                specimen_type: specimen_type.clone(),
                combined,
                by_class,
            }
        })
        .collect();
    SpecimenStrata {
        strata,
        other_isolates: ranking.other_isolates,
    }
}

/// One table per organism class, using that class's antibiotic panel.
///
/// Organisms missing from the taxonomy are excluded here and flagged.
pub fn stratify_by_class(
    isolates: &[DeduplicatedIsolate],
    classifier: &OrganismClassifier,
    min_isolates: u32,
) -> ClassStrata {
    let unclassified: Vec<String> = isolates
        .iter()
        .map(DeduplicatedIsolate::organism)
        .filter(|organism| classifier.classify(organism).is_none())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut issues: Vec<RowIssue> = unclassified
        .iter()
        .map(|organism| {
            warn!(organism = %organism, "organism not in taxonomy");
            RowIssue::unlocated(RowError::UnclassifiedOrganism {
                organism: organism.clone(),
            })
        })
        .collect();

    let strata: Vec<StratumTable> = OrganismClass::ALL
        .into_iter()
        .map(|class| {
            class_table(
                Stratum::Class(class),
                isolates,
                class,
                classifier,
                min_isolates,
            )
        })
        .collect();
    for table in strata.iter().filter(|table| table.insufficient_data) {
        warn!(stratum = %table.stratum, "stratum has no qualifying isolates");
        issues.push(RowIssue::unlocated(RowError::EmptyStratum {
            stratum: table.name(),
        }));
    }

    ClassStrata {
        strata,
        unclassified,
        issues,
    }
}
