//! Samples returned by the solver gateway.

use std::collections::BTreeMap;
use std::fmt;

use crate::index::VariableIndexer;

/// Key of a sample entry as reported by the solver.
///
/// Gateways may return auxiliary or malformed keys alongside the variable
/// indices; those survive here as [`SampleKey::Label`] and are ignored by
/// the decoder.
///
/// With the `serde` feature, keys are read back from text as well as from
/// integers: `"12"` becomes `Index(12)`, since formats such as JSON only
/// allow string map keys. Only the canonical decimal form is parsed, so
/// `"012"` and `"+1"` stay labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SampleKey {
    Index(i64),
    Label(String),
}

impl SampleKey {
    /// Parses `text` as an index when it is the canonical decimal form of
    /// an `i64`; anything else is a label.
    pub fn parse(text: &str) -> Self {
        match text.parse::<i64>() {
            Ok(i) if i.to_string() == text => SampleKey::Index(i),
            _ => SampleKey::Label(text.to_string()),
        }
    }

    /// Non-negative integer form of the key, if any.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            SampleKey::Index(i) => usize::try_from(*i).ok(),
            SampleKey::Label(_) => None,
        }
    }
}

impl From<usize> for SampleKey {
    fn from(i: usize) -> Self {
        // Indices beyond i64::MAX cannot come from a real solver; keep them
        // as labels so they are ignored rather than wrapped.
        i64::try_from(i)
            .map(SampleKey::Index)
            .unwrap_or_else(|_| SampleKey::Label(i.to_string()))
    }
}

impl From<i64> for SampleKey {
    fn from(i: i64) -> Self {
        SampleKey::Index(i)
    }
}

impl From<&str> for SampleKey {
    fn from(s: &str) -> Self {
        SampleKey::Label(s.to_string())
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKey::Index(i) => write!(f, "{i}"),
            SampleKey::Label(s) => write!(f, "{s:?}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SampleKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleKey::Index(i) => serializer.serialize_i64(*i),
            SampleKey::Label(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SampleKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SampleKeyVisitor)
    }
}

#[cfg(feature = "serde")]
struct SampleKeyVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for SampleKeyVisitor {
    type Value = SampleKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string sample key")
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<SampleKey, E> {
        Ok(SampleKey::Index(v))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<SampleKey, E> {
        Ok(i64::try_from(v)
            .map(SampleKey::Index)
            .unwrap_or_else(|_| SampleKey::Label(v.to_string())))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<SampleKey, E> {
        Ok(SampleKey::parse(v))
    }
}

/// One candidate assignment from the solver: key → 0/1.
///
/// Not guaranteed feasible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    values: BTreeMap<SampleKey, bool>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sample from a full assignment; key `i` holds `assignment[i]`.
    pub fn from_assignment(assignment: &[bool]) -> Self {
        assignment
            .iter()
            .enumerate()
            .map(|(i, &v)| (SampleKey::from(i), v))
            .collect()
    }

    /// Sample with the given flat indices set and every other index in
    /// `[0, n)` cleared.
    pub fn with_ones(n: usize, ones: impl IntoIterator<Item = usize>) -> Self {
        let mut assignment = vec![false; n];
        let mut sample = Sample::new();
        for i in ones {
            match assignment.get_mut(i) {
                Some(slot) => *slot = true,
                None => sample.insert(i, true),
            }
        }
        for (i, v) in assignment.into_iter().enumerate() {
            sample.insert(i, v);
        }
        sample
    }

    pub fn insert(&mut self, key: impl Into<SampleKey>, value: bool) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &SampleKey) -> Option<bool> {
        self.values.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SampleKey, bool)> + '_ {
        self.values.iter().map(|(k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries set to 1.
    pub fn ones(&self) -> usize {
        self.values.values().filter(|&&v| v).count()
    }

    /// Dense assignment over `indexer`'s variables. Keys outside `[0, N)`
    /// and non-integer keys are dropped; missing indices read as 0.
    pub fn to_assignment(&self, indexer: &VariableIndexer) -> Vec<bool> {
        let n = indexer.variable_count();
        let mut assignment = vec![false; n];
        for (key, value) in self.iter() {
            if let Some(i) = key.as_index().filter(|&i| i < n) {
                assignment[i] = value;
            }
        }
        assignment
    }
}

impl<K: Into<SampleKey>> FromIterator<(K, bool)> for Sample {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;
