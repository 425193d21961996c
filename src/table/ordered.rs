//! Insertion-ordered map serialization
//!
//! JSON objects emitted by the engine (table snapshots, class listings,
//! approximations) must keep the enumeration order of the pipeline so that
//! two runs over the same input produce byte-identical output.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A list of key/value pairs serialized as a JSON object in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, V> OrderedMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; keys are not deduplicated
    pub fn push(&mut self, key: K, value: V) {
        self.entries.push((key, value));
    }

    /// Look up the first entry with the given key
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.push("zebra".to_string(), 1);
        map.push("apple".to_string(), 2);
        map.push("mango".to_string(), 3);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zebra":1,"apple":2,"mango":3}"#);
    }

    #[test]
    fn test_get_and_len() {
        let map: OrderedMap<String, u32> =
            vec![("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"b".to_string()), Some(&2));
        assert_eq!(map.get(&"c".to_string()), None);
    }
}
