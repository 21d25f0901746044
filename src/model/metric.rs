//! Metric specifications and the process-wide metric catalog.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a raw metric value maps onto the common 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MetricSpec {
    /// Linear scale: `((raw - min) / (max - min)) * 100`, never clamped
    Range { min: f64, max: f64 },
    /// Exact label lookup, unmatched labels resolve to `default`
    Categorical {
        table: IndexMap<String, f64>,
        default: f64,
    },
}

impl MetricSpec {
    /// Convenience constructor for a range spec.
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Convenience constructor for a categorical spec.
    pub fn categorical<'a>(table: impl IntoIterator<Item = (&'a str, f64)>, default: f64) -> Self {
        Self::Categorical {
            table: table
                .into_iter()
                .map(|(label, score)| (label.to_string(), score))
                .collect(),
            default,
        }
    }

    /// Whether raw values of this metric are expected to be numeric.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

/// A named metric: display labels plus its normalization spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricDefinition {
    /// Human label shown in factor selection controls
    pub label: String,
    /// Column header in recommendation tables (defaults to `label`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Normalization spec
    pub spec: MetricSpec,
}

impl MetricDefinition {
    pub fn new(label: impl Into<String>, spec: MetricSpec) -> Self {
        Self {
            label: label.into(),
            column: None,
            spec,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Header used for this metric in recommendation output.
    #[must_use]
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.label)
    }
}

/// Ordered mapping from metric name to definition.
///
/// Loaded once at startup and read-only afterwards. Validation lives with
/// the rest of the configuration checks (see [`crate::config::Validatable`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MetricCatalog {
    metrics: IndexMap<String, MetricDefinition>,
}

impl MetricCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            metrics: IndexMap::new(),
        }
    }

    /// The built-in catalog.
    ///
    /// `RiskLevel` only distinguishes "Low" (100); every other label, including
    /// "Medium", "High" and unknown values, scores 50. This is a configured
    /// two-tier collapse, not multi-tier risk scaling; override the table in
    /// the config file to score "High" separately.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_metric(
                "stockPrice",
                MetricDefinition::new("Stock Price", MetricSpec::range(0.0, 2000.0)),
            )
            .with_metric(
                "ESGScore",
                MetricDefinition::new("ESG Score", MetricSpec::range(0.0, 100.0)),
            )
            .with_metric(
                "GovernanceRating",
                MetricDefinition::new(
                    "Governance Rating (0-100)",
                    MetricSpec::categorical(
                        [
                            ("A+", 90.0),
                            ("A", 80.0),
                            ("B+", 70.0),
                            ("B", 60.0),
                            ("C+", 50.0),
                            ("C", 40.0),
                        ],
                        50.0,
                    ),
                )
                .with_column("Governance Rating"),
            )
            .with_metric(
                "RiskLevel",
                MetricDefinition::new(
                    "Low/Medium Risk",
                    MetricSpec::categorical([("Low", 100.0)], 50.0),
                )
                .with_column("Risk Level"),
            )
            .with_metric(
                "MarketCap",
                MetricDefinition::new("Market Capitalization", MetricSpec::range(0.0, 3.0e12)),
            )
    }

    /// Builder-style insert. Re-inserting a name replaces its definition in place.
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, definition: MetricDefinition) -> Self {
        self.metrics.insert(name.into(), definition);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricDefinition> {
        self.metrics.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// Metric names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricDefinition)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_labels() {
        let catalog = MetricCatalog::builtin();
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec![
                "stockPrice",
                "ESGScore",
                "GovernanceRating",
                "RiskLevel",
                "MarketCap"
            ]
        );
        let governance = catalog.get("GovernanceRating").unwrap();
        assert_eq!(governance.label, "Governance Rating (0-100)");
        assert_eq!(governance.column(), "Governance Rating");
        assert_eq!(catalog.get("ESGScore").unwrap().column(), "ESG Score");
    }

    #[test]
    fn test_spec_yaml_shape() {
        let yaml = r#"
kind: categorical
table:
  Low: 100
  High: 0
default: 50
"#;
        let spec: MetricSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec,
            MetricSpec::categorical([("Low", 100.0), ("High", 0.0)], 50.0)
        );

        let spec: MetricSpec = serde_yaml::from_str("kind: range\nmin: 0\nmax: 10").unwrap();
        assert_eq!(spec, MetricSpec::range(0.0, 10.0));
        assert!(spec.is_numeric());
    }

    #[test]
    fn test_with_metric_replaces_in_place() {
        let catalog = MetricCatalog::builtin().with_metric(
            "ESGScore",
            MetricDefinition::new("ESG (0-50)", MetricSpec::range(0.0, 50.0)),
        );
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.names().nth(1), Some("ESGScore"));
        assert_eq!(catalog.get("ESGScore").unwrap().label, "ESG (0-50)");
    }
}
