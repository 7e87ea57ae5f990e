use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Metric name to raw per-run observations (e.g. per-fold IoU values).
///
/// Keys iterate in sorted order so comparisons over the same inputs always
/// visit metrics identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MetricSamples(BTreeMap<String, Vec<f64>>);

impl MetricSamples {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with_metric(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Option<Vec<f64>> {
        self.0.insert(name.into(), values)
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<f64>)> for MetricSamples {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, Vec<f64>>> for MetricSamples {
    fn from(map: BTreeMap<String, Vec<f64>>) -> Self {
        Self(map)
    }
}

impl IntoIterator for MetricSamples {
    type Item = (String, Vec<f64>);
    type IntoIter = btree_map::IntoIter<String, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Descriptive statistics of a single sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}
