//! Metric normalization onto the common 0-100 scale.

use crate::model::{MetricSpec, RawValue};
use indexmap::IndexMap;
use serde::Serialize;

/// Result of normalizing one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// Score on the 0-100 scale (may fall outside it for out-of-domain input)
    pub score: f64,
    /// True when the value could not be interpreted and a fallback was used
    pub fallback: bool,
}

/// Normalize a raw value according to its spec.
///
/// Range specs scale linearly without clamping. Categorical specs look the
/// label up exactly and fall back to the spec default for unmatched labels.
#[must_use]
pub fn normalize(value: &RawValue, spec: &MetricSpec) -> f64 {
    normalize_tracked(value, spec).score
}

/// Like [`normalize`], also reporting whether a fallback was applied.
#[must_use]
pub fn normalize_tracked(value: &RawValue, spec: &MetricSpec) -> Normalized {
    match spec {
        MetricSpec::Range { min, max } => {
            let (raw, fallback) = match value.as_number() {
                Some(n) => (n, false),
                None => (0.0, true),
            };
            Normalized {
                score: scale(raw, *min, *max),
                fallback,
            }
        }
        MetricSpec::Categorical { table, default } => {
            match table.get(value.as_label().as_ref()) {
                Some(score) => Normalized {
                    score: *score,
                    fallback: false,
                },
                None => Normalized {
                    score: *default,
                    fallback: true,
                },
            }
        }
    }
}

/// Linear scale onto 0-100. `min == max` is rejected by config validation.
#[inline]
fn scale(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)) * 100.0
}

/// Normalized scores for one company, keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedScoreVector {
    scores: IndexMap<String, f64>,
}

impl NormalizedScoreVector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metric: impl Into<String>, score: f64) {
        self.scores.insert(metric.into(), score);
    }

    #[must_use]
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.scores.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for NormalizedScoreVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
