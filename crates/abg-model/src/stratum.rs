//! Named partitions of the deduplicated isolate set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateTable;

/// Taxonomic reporting group of an organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganismClass {
    GramNegative,
    GramPositive,
    FungiYeast,
}

impl OrganismClass {
    /// All classes in reporting order.
    pub const ALL: [OrganismClass; 3] = [
        OrganismClass::GramNegative,
        OrganismClass::GramPositive,
        OrganismClass::FungiYeast,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::GramNegative => "Gram-negative",
            Self::GramPositive => "Gram-positive",
            Self::FungiYeast => "Fungi/Yeast",
        }
    }

    /// Whether the class is reported against antifungal agents only.
    pub fn is_fungal(self) -> bool {
        matches!(self, Self::FungiYeast)
    }
}

impl fmt::Display for OrganismClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Partition key of a stratified table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Stratum {
    Specimen(String),
    Class(OrganismClass),
}

impl Stratum {
    pub fn name(&self) -> String {
        match self {
            Self::Specimen(name) => name.clone(),
            Self::Class(class) => class.label().to_string(),
        }
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Specimen(name) => write!(f, "specimen {name}"),
            Self::Class(class) => write!(f, "{class}"),
        }
    }
}

/// Aggregate table for one stratum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratumTable {
    pub stratum: Stratum,
    /// Deduplicated isolates that fell into the stratum.
    pub isolates: u32,
    /// True when the stratum produced no reportable cell.
    pub insufficient_data: bool,
    pub table: AggregateTable,
}

impl StratumTable {
    pub fn new(stratum: Stratum, isolates: u32, table: AggregateTable) -> Self {
        Self {
            insufficient_data: isolates == 0 || table.is_empty(),
            stratum,
            isolates,
            table,
        }
    }

    pub fn name(&self) -> String {
        self.stratum.name()
    }
}

/// One of the dominant specimen types with its own tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecimenStratum {
    /// 1-based rank by isolate count.
    pub rank: usize,
    pub specimen_type: String,
    /// All organisms from this specimen type.
    pub combined: StratumTable,
    /// Per organism class, in reporting order.
    pub by_class: Vec<StratumTable>,
}

impl SpecimenStratum {
    pub fn isolates(&self) -> u32 {
        self.combined.isolates
    }

    pub fn class_table(&self, class: OrganismClass) -> Option<&StratumTable> {
        self.by_class
            .iter()
            .find(|table| table.stratum == Stratum::Class(class))
    }
}
