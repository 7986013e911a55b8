use std::collections::HashMap;

/// Trim and collapse internal whitespace, preserving case.
pub fn canonical_name(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Key used for case-insensitive name comparison.
pub fn lookup_key(name: &str) -> String {
    canonical_name(name).to_uppercase()
}

#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    map: HashMap<String, V>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<V> CaseInsensitiveMap<V> {
    /// Insert unless the name is already present; the first entry wins.
    pub fn insert_first(&mut self, name: &str, value: V) -> bool {
        let key = lookup_key(name);
        if self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, value);
        true
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.map.get(&lookup_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&lookup_key(name))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    map: CaseInsensitiveMap<String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = CaseInsensitiveMap::default();
        for name in names {
            let name = name.as_ref();
            map.insert_first(name, canonical_name(name));
        }
        Self { map }
    }

    /// Original spelling of a matching name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_case() {
        assert_eq!(canonical_name("  Candida   albicans \t"), "Candida albicans");
        let set = CaseInsensitiveSet::new(["Amphotericin B"]);
        assert!(set.contains("amphotericin  b"));
        assert_eq!(set.get("AMPHOTERICIN B"), Some("Amphotericin B"));
        assert!(!set.contains("Amphotericin"));
    }
}
