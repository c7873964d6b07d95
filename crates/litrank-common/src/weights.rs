//! Keyword → weight table as written in configuration, kept in document order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered keyword weights. The order decides the order of
/// matched-keyword entries and of weight listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordWeights {
    entries: Vec<(String, f64)>,
}

impl KeywordWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced keyword keeps its original position.
    pub fn insert(&mut self, keyword: impl Into<String>, value: f64) {
        let keyword = keyword.into();
        match self.entries.iter().position(|(k, _)| *k == keyword) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((keyword, value)),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == keyword).map(|(_, v)| *v)
    }

    pub fn contains_key(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for KeywordWeights {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut weights = KeywordWeights::new();
        for (k, v) in iter {
            weights.insert(k, v);
        }
        weights
    }
}

impl IntoIterator for KeywordWeights {
    type Item = (String, f64);
    type IntoIter = std::vec::IntoIter<(String, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for KeywordWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct KeywordWeightsVisitor;

impl<'de> Visitor<'de> for KeywordWeightsVisitor {
    type Value = KeywordWeights;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of keyword = weight")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut weights = KeywordWeights::new();
        while let Some((keyword, value)) = access.next_entry::<String, f64>()? {
            weights.insert(keyword, value);
        }
        Ok(weights)
    }
}

impl<'de> Deserialize<'de> for KeywordWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(KeywordWeightsVisitor)
    }
}
