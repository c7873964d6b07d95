//! Keyword weight map.
//! Weights follow the slider contract: range [0, 10], step 0.1.

use litrank_common::{KeywordWeights, LitrankError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_WEIGHT: f64 = 0.0;
pub const MAX_WEIGHT: f64 = 10.0;
pub const WEIGHT_STEP: f64 = 0.1;
const STEPS_PER_UNIT: f64 = 10.0;

/// Keyword → weight in insertion order. Every stored value is finite and
/// within [0, 10].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KeywordWeights", into = "KeywordWeights")]
pub struct WeightMap {
    weights: KeywordWeights,
}

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `keyword`; unknown keywords weigh nothing.
    pub fn get(&self, keyword: &str) -> f64 {
        self.weights.get(keyword).unwrap_or(0.0)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.weights.contains_key(keyword)
    }

    /// Set a weight, clamped into range and snapped to the slider step.
    /// Returns the value actually stored.
    pub fn set(&mut self, keyword: impl Into<String>, value: f64) -> Result<f64> {
        let keyword = keyword.into();
        if !value.is_finite() {
            return Err(LitrankError::InvalidWeight { keyword, value });
        }
        let stored = quantize(value);
        self.weights.insert(keyword, stored);
        Ok(stored)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.weights.keywords()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn quantize(value: f64) -> f64 {
    let clamped = value.clamp(MIN_WEIGHT, MAX_WEIGHT);
    (clamped * STEPS_PER_UNIT).round() / STEPS_PER_UNIT
}

impl TryFrom<KeywordWeights> for WeightMap {
    type Error = LitrankError;

    fn try_from(raw: KeywordWeights) -> Result<Self> {
        let mut map = WeightMap::new();
        for (keyword, value) in raw {
            map.set(keyword, value)?;
        }
        Ok(map)
    }
}

impl From<WeightMap> for KeywordWeights {
    fn from(map: WeightMap) -> Self {
        map.weights
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for WeightMap {
    /// Non-finite values are dropped.
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = WeightMap::new();
        for (k, v) in iter {
            let _ = map.set(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keyword_weighs_zero() {
        let w = WeightMap::from_iter([("a", 2.0)]);
        assert_eq!(w.get("a"), 2.0);
        assert_eq!(w.get("missing"), 0.0);
        assert!(!w.contains("missing"));
    }

    #[test]
    fn test_set_clamps_into_range() {
        let mut w = WeightMap::new();
        assert_eq!(w.set("hi", 12.5).unwrap(), 10.0);
        assert_eq!(w.set("lo", -3.0).unwrap(), 0.0);
        for (_, v) in w.iter() {
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&v));
        }
    }

    #[test]
    fn test_set_snaps_to_step() {
        let mut w = WeightMap::new();
        let stored = w.set("a", 3.14159).unwrap();
        assert!((stored - 3.1).abs() < 1e-9, "got {stored}");
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut w = WeightMap::new();
        assert!(w.set("a", f64::NAN).is_err());
        assert!(w.set("a", f64::INFINITY).is_err());
        assert!(w.is_empty());
    }

    #[test]
    fn test_deserialize_validates() {
        let w: WeightMap = serde_json::from_str(r#"{"a": 1.5, "b": 20}"#).unwrap();
        assert_eq!(w.get("a"), 1.5);
        assert_eq!(w.get("b"), 10.0);
        assert_eq!(w.keywords().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut w: WeightMap = serde_json::from_str(r#"{"visualization": 3, "dashboard": 2, "analytics": 1}"#).unwrap();
        w.set("dashboard", 4.0).unwrap();
        w.set("cohort", 1.0).unwrap();
        assert_eq!(
            w.keywords().collect::<Vec<_>>(),
            vec!["visualization", "dashboard", "analytics", "cohort"]
        );
    }
}
