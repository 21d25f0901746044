//! Default substitution for absent or unusable raw values.

use crate::config::{DEFAULT_CATEGORICAL_PLACEHOLDER, DEFAULT_NUMERIC_SUBSTITUTE};
use crate::model::{MetricSpec, RawValue};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Why a value was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// The record had no value for the metric
    Missing,
    /// A numeric metric held something that is not a finite number
    Unparseable,
}

/// A cleaned value plus the substitution applied to produce it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub value: RawValue,
    pub substitution: Option<Substitution>,
}

/// Policy applied to every (row, metric) pair before normalization.
///
/// Never mutates the source record: cleaning returns a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MissingValuePolicy {
    /// Substitute for absent or unparseable numeric values
    pub numeric_default: f64,
    /// Placeholder label for absent categorical values. Normally unmatched
    /// in the lookup table, so it scores the table's default.
    pub categorical_placeholder: String,
}

impl Default for MissingValuePolicy {
    fn default() -> Self {
        Self {
            numeric_default: DEFAULT_NUMERIC_SUBSTITUTE,
            categorical_placeholder: DEFAULT_CATEGORICAL_PLACEHOLDER.to_string(),
        }
    }
}

impl MissingValuePolicy {
    /// Clean one raw value for a metric.
    #[must_use]
    pub fn clean(&self, raw: Option<&RawValue>, spec: &MetricSpec) -> Cleaned {
        match (raw, spec.is_numeric()) {
            (None, true) => self.substitute_number(Substitution::Missing),
            (None, false) => Cleaned {
                value: RawValue::Text(self.categorical_placeholder.clone()),
                substitution: Some(Substitution::Missing),
            },
            (Some(value), true) => match value.as_number() {
                Some(n) => Cleaned {
                    value: RawValue::Number(n),
                    substitution: None,
                },
                None => self.substitute_number(Substitution::Unparseable),
            },
            (Some(value), false) => Cleaned {
                value: value.clone(),
                substitution: None,
            },
        }
    }

    fn substitute_number(&self, kind: Substitution) -> Cleaned {
        Cleaned {
            value: RawValue::Number(self.numeric_default),
            substitution: Some(kind),
        }
    }
}
