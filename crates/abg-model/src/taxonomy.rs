//! Organism classification and antifungal agent lists.

use serde::{Deserialize, Serialize};

use crate::lookup::{CaseInsensitiveMap, CaseInsensitiveSet};
use crate::stratum::OrganismClass;

const GRAM_NEGATIVE: &[&str] = &[
    "Escherichia coli",
    "Klebsiella pneumoniae",
    "Pseudomonas aeruginosa",
    "Proteus mirabilis",
    "Klebsiella aerogenes",
    "Enterobacter cloacae",
    "Citrobacter freundii",
    "Acinetobacter Baumanni",
    "Morganella morgani",
    "Salmonella Species",
    "Shigella Species",
    "Neisseria gonorrhoeae",
    "Haemophilus influenzae",
    "Burkholderia cepacia",
    "Stenotrophomonas maltophilia",
    "Serratia marcescens",
    "Escherichia coli O157",
];

const GRAM_POSITIVE: &[&str] = &[
    "Staphylococcus aureus",
    "Staphylococcus epidermidis",
    "Staphylococcus saprophyticus",
    "Staphylococcus hemolyticus",
    "Enterococcus faecalis",
    "Enterococcus faecium",
    "Streptococcus pneumoniae",
    "Streptococcus pyogenes",
    "Streptococcus agalactiae",
    "Streptococcus viridians",
    "Coagulase negative Staphylococcus",
    "Listeria monocytogenes",
    "Staphylococcus lentus",
    "Staphylococcus sciuri",
    "Aerococcus viridans",
    "Micrococcus species",
    "Bacillus Species",
];

const FUNGI: &[&str] = &[
    "Candida albicans",
    "Candida glabrata",
    "Candida tropicalis",
    "Candida parapsilosis",
    "Candida krusei",
    "Candida auris",
    "Cryptococcus neoformans",
    "Candida guillermondii",
    "Candida dubliniensis",
    "Cryptococcus laurentii",
    "Candida Lusitaniae",
    "Trichosporon asahii",
];

const ANTIFUNGALS: &[&str] = &[
    "Fluconazole",
    "Voriconazole",
    "Caspofungin",
    "Micafungin",
    "Flucytosine",
    "Amphotericin B",
    "Itraconazole",
    "Posaconazole",
    "Anidulafungin",
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// Organism lists per class plus the antifungal agent list.
///
/// An organism listed under more than one class takes the first class in
/// reporting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    pub gram_negative: Vec<String>,
    pub gram_positive: Vec<String>,
    pub fungi: Vec<String>,
    pub antifungals: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            gram_negative: owned(GRAM_NEGATIVE),
            gram_positive: owned(GRAM_POSITIVE),
            fungi: owned(FUNGI),
            antifungals: owned(ANTIFUNGALS),
        }
    }
}

impl Taxonomy {
    pub fn empty() -> Self {
        Self {
            gram_negative: Vec::new(),
            gram_positive: Vec::new(),
            fungi: Vec::new(),
            antifungals: Vec::new(),
        }
    }

    pub fn organisms(&self, class: OrganismClass) -> &[String] {
        match class {
            OrganismClass::GramNegative => &self.gram_negative,
            OrganismClass::GramPositive => &self.gram_positive,
            OrganismClass::FungiYeast => &self.fungi,
        }
    }

    pub fn classifier(&self) -> OrganismClassifier {
        let mut classes = CaseInsensitiveMap::default();
        for class in OrganismClass::ALL {
            for organism in self.organisms(class) {
                classes.insert_first(organism, class);
            }
        }
        OrganismClassifier {
            classes,
            antifungals: CaseInsensitiveSet::new(&self.antifungals),
        }
    }
}

/// Lookup built from a [`Taxonomy`].
#[derive(Debug, Clone, Default)]
pub struct OrganismClassifier {
    classes: CaseInsensitiveMap<OrganismClass>,
    antifungals: CaseInsensitiveSet,
}

impl OrganismClassifier {
    pub fn classify(&self, organism: &str) -> Option<OrganismClass> {
        self.classes.get(organism).copied()
    }

    pub fn is_antifungal(&self, antibiotic: &str) -> bool {
        self.antifungals.contains(antibiotic)
    }
}
