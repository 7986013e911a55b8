//! Mapping of raw AST result codes onto S/I/R.

use std::collections::BTreeMap;

use abg_model::{CaseInsensitiveMap, Interpretation};

const SUSCEPTIBLE: &[&str] = &["S", "Susceptible", "Sensitive"];
const INTERMEDIATE: &[&str] = &["I", "Intermediate", "SDD", "Susceptible-dose dependent"];
const RESISTANT: &[&str] = &["R", "Resistant"];
const NOT_TESTED: &[&str] = &["", "NT", "Not tested", "N/A", "-"];

/// Outcome of reading one raw result cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultValue {
    Reported(Interpretation),
    /// Explicitly blank or marked as not tested.
    NotTested,
    /// Unrecognized code; counted as not tested and flagged.
    Unrecognized,
}

#[derive(Debug, Clone)]
pub struct InterpretationMap {
    codes: CaseInsensitiveMap<Option<Interpretation>>,
}

impl InterpretationMap {
    /// Built-in codes plus configured aliases. Aliases never override built-ins.
    pub fn new(aliases: &BTreeMap<String, Interpretation>) -> Self {
        let mut codes = CaseInsensitiveMap::default();
        let builtin = [
            (SUSCEPTIBLE, Some(Interpretation::Susceptible)),
            (INTERMEDIATE, Some(Interpretation::Intermediate)),
            (RESISTANT, Some(Interpretation::Resistant)),
            (NOT_TESTED, None),
        ];
        for (names, value) in builtin {
            for name in names {
                codes.insert_first(name, value);
            }
        }
        for (alias, value) in aliases {
            codes.insert_first(alias, Some(*value));
        }
        Self { codes }
    }

    pub fn classify(&self, raw: &str) -> ResultValue {
        match self.codes.get(raw) {
            Some(Some(interpretation)) => ResultValue::Reported(*interpretation),
            Some(None) => ResultValue::NotTested,
            None => ResultValue::Unrecognized,
        }
    }
}

impl Default for InterpretationMap {
    fn default() -> Self {
        Self::new(&BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_codes_are_case_insensitive() {
        let map = InterpretationMap::default();
        assert_eq!(
            map.classify("sensitive"),
            ResultValue::Reported(Interpretation::Susceptible)
        );
        assert_eq!(
            map.classify(" susceptible-dose  dependent "),
            ResultValue::Reported(Interpretation::Intermediate)
        );
        assert_eq!(map.classify("r"), ResultValue::Reported(Interpretation::Resistant));
        assert_eq!(map.classify("n/a"), ResultValue::NotTested);
        assert_eq!(map.classify(""), ResultValue::NotTested);
        assert_eq!(map.classify("pending"), ResultValue::Unrecognized);
    }

    #[test]
    fn aliases_extend_builtins() {
        let mut aliases = BTreeMap::new();
        aliases.insert("POS".to_string(), Interpretation::Resistant);
        aliases.insert("S".to_string(), Interpretation::Resistant);
        let map = InterpretationMap::new(&aliases);
        assert_eq!(map.classify("pos"), ResultValue::Reported(Interpretation::Resistant));
        assert_eq!(map.classify("S"), ResultValue::Reported(Interpretation::Susceptible));
    }
}
