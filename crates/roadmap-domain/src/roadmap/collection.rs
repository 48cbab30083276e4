//! Id-keyed ordered collection of child entities
//!
//! Backed by an [`IndexMap`] so lookups by id are O(1) while iteration follows
//! insertion order. Persisted as a plain array of child records; on load a
//! repeated id replaces the earlier record, the same as `insert`.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// An entity that is addressed by an id inside its parent
pub trait Keyed {
    type Key: Clone + Eq + Hash + std::fmt::Debug;

    fn key(&self) -> &Self::Key;
}

#[derive(Debug, Clone)]
pub struct EntityMap<V: Keyed> {
    entries: IndexMap<V::Key, V>,
}

impl<V: Keyed> EntityMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &V::Key) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &V::Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Children in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &V::Key> {
        self.entries.keys()
    }

    /// Insert or replace; a replaced entry keeps its position
    pub(crate) fn insert(&mut self, value: V) {
        self.entries.insert(value.key().clone(), value);
    }

    /// Remove preserving the relative order of the remaining entries
    pub(crate) fn remove(&mut self, key: &V::Key) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub(crate) fn move_to_front(&mut self, key: &V::Key) {
        if let Some(index) = self.entries.get_index_of(key) {
            self.entries.move_index(index, 0);
        }
    }

    pub(crate) fn move_to_back(&mut self, key: &V::Key) {
        if let Some(index) = self.entries.get_index_of(key) {
            let last = self.entries.len() - 1;
            self.entries.move_index(index, last);
        }
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    /// Stable sort of the iteration order
    pub(crate) fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&V, &V) -> std::cmp::Ordering,
    {
        self.entries.sort_by(|_, a, _, b| compare(a, b));
    }
}

impl<V: Keyed> Default for EntityMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Keyed + PartialEq> PartialEq for EntityMap<V> {
    /// Set equality: same ids mapping to equal entities, regardless of order
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Keyed> FromIterator<V> for EntityMap<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut map = Self::new();
        for value in iter {
            map.insert(value);
        }
        map
    }
}

impl<V: Keyed + Serialize> Serialize for EntityMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for value in self.entries.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, V: Keyed + Deserialize<'de>> Deserialize<'de> for EntityMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<V>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Node {
        id: u32,
        label: String,
    }

    impl Keyed for Node {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.id
        }
    }

    fn node(id: u32, label: &str) -> Node {
        Node {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map: EntityMap<Node> = [node(1, "a"), node(2, "b")].into_iter().collect();
        map.insert(node(1, "a2"));

        let labels: Vec<_> = map.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["a2", "b"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: EntityMap<Node> = [node(1, "a"), node(2, "b"), node(3, "c")]
            .into_iter()
            .collect();
        map.remove(&2);

        let ids: Vec<_> = map.keys().copied().collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_serializes_as_array_and_dedups_on_load() {
        let json = serde_json::json!([
            {"id": 1, "label": "first"},
            {"id": 2, "label": "second"},
            {"id": 1, "label": "last wins"}
        ]);
        let map = EntityMap::<Node>::deserialize(json).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1).unwrap().label, "last wins");

        let out = serde_json::to_value(&map).unwrap();
        assert!(out.is_array());
        assert_eq!(out.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: EntityMap<Node> = [node(1, "a"), node(2, "b")].into_iter().collect();
        let b: EntityMap<Node> = [node(2, "b"), node(1, "a")].into_iter().collect();
        assert_eq!(a, b);
    }
}
