//! Ordered key/value map produced by a collector.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from string keys to string values.
///
/// Insertion order is preserved, and keys are unique: inserting an existing
/// key replaces its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMap {
    entries: Vec<(String, String)>,
}

impl ExportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Keep only the entries whose key satisfies `keep`, preserving order.
    pub fn retain_keys<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.entries.retain(|(k, _)| keep(k));
    }
}

impl<K, V> FromIterator<(K, V)> for ExportMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ExportMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Serializes as a map in insertion order, so order-preserving formats
/// (JSON, YAML, TOML emitters) keep collector order.
impl Serialize for ExportMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
