use std::collections::BTreeMap;

/// Map keyed by ASCII-case-insensitive names that remembers the spelling
/// each entry was first inserted with.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    map: BTreeMap<String, (String, V)>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `name`; an existing entry with the same folded
    /// name keeps its value and the new one is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        if self.map.contains_key(&key) {
            return Some(value);
        }
        self.map.insert(key, (name, value));
        None
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value)
    }

    /// Original spelling of the stored name.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(|(original, _)| original.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries ordered by folded name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.map
            .values()
            .map(|(name, value)| (name.as_str(), value))
    }
}
