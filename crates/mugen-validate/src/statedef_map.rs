use std::collections::BTreeMap;

use serde::Serialize;

/// Project-wide mapping of statedef number to the key of the state file
/// that declared it first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatedefMap {
    owners: BTreeMap<i32, String>,
}

impl StatedefMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` for `file_key` unless already owned.
    ///
    /// Returns the existing owner when the id was taken; the map is left
    /// unchanged in that case.
    pub fn claim(&mut self, id: i32, file_key: &str) -> Option<&str> {
        use std::collections::btree_map::Entry;
        match self.owners.entry(id) {
            Entry::Occupied(entry) => Some(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                entry.insert(file_key.to_string());
                None
            }
        }
    }

    pub fn owner(&self, id: i32) -> Option<&str> {
        self.owners.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Entries in ascending statedef order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.owners.iter().map(|(id, key)| (*id, key.as_str()))
    }
}

/// Per-file index of statedef number to section position.
///
/// When a file declares the same number twice, the first position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatedefIndex {
    positions: BTreeMap<i32, usize>,
}

impl StatedefIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: i32, position: usize) {
        self.positions.entry(id).or_insert(position);
    }

    pub fn position(&self, id: i32) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.positions.iter().map(|(id, pos)| (*id, *pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_wins() {
        let mut map = StatedefMap::new();
        assert_eq!(map.claim(5, "st"), None);
        assert_eq!(map.claim(5, "st0"), Some("st"));
        assert_eq!(map.owner(5), Some("st"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn index_keeps_first_position() {
        let mut index = StatedefIndex::new();
        index.record(200, 3);
        index.record(200, 9);
        assert_eq!(index.position(200), Some(3));
        assert_eq!(index.position(201), None);
    }
}
