//! Data-quality counters collected while normalizing a dataset.

use super::Substitution;
use indexmap::IndexMap;
use serde::Serialize;

/// Per-metric data-quality counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricQuality {
    pub missing: usize,
    pub unparseable: usize,
    pub unmatched_labels: usize,
}

impl MetricQuality {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.missing + self.unparseable + self.unmatched_labels
    }
}

/// Counts of silently absorbed data-quality issues for one request.
///
/// None of these abort a request; they exist so callers and tests can see
/// how much of a result rests on default substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQualityStats {
    /// Absent values replaced by the policy default
    pub missing: usize,
    /// Non-numeric values in numeric metrics replaced by the policy default
    pub unparseable: usize,
    /// Categorical labels not found in the lookup table
    pub unmatched_labels: usize,
    /// Breakdown by metric name
    pub per_metric: IndexMap<String, MetricQuality>,
}

impl DataQualityStats {
    pub fn record_substitution(&mut self, metric: &str, kind: Substitution) {
        let entry = self.entry(metric);
        match kind {
            Substitution::Missing => {
                entry.missing += 1;
                self.missing += 1;
            }
            Substitution::Unparseable => {
                entry.unparseable += 1;
                self.unparseable += 1;
            }
        }
    }

    pub fn record_unmatched_label(&mut self, metric: &str) {
        self.entry(metric).unmatched_labels += 1;
        self.unmatched_labels += 1;
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.missing + self.unparseable + self.unmatched_labels
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Counts for one metric (all zero if nothing was recorded).
    #[must_use]
    pub fn for_metric(&self, metric: &str) -> MetricQuality {
        self.per_metric.get(metric).copied().unwrap_or_default()
    }

    /// One-line summary for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} substitutions ({} missing, {} unparseable), {} unmatched labels",
            self.missing + self.unparseable,
            self.missing,
            self.unparseable,
            self.unmatched_labels
        )
    }

    fn entry(&mut self, metric: &str) -> &mut MetricQuality {
        self.per_metric.entry(metric.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_roll_up() {
        let mut stats = DataQualityStats::default();
        stats.record_substitution("MarketCap", Substitution::Missing);
        stats.record_substitution("MarketCap", Substitution::Missing);
        stats.record_substitution("stockPrice", Substitution::Unparseable);
        stats.record_unmatched_label("GovernanceRating");

        assert_eq!(stats.total(), 4);
        assert!(!stats.is_clean());
        assert_eq!(stats.for_metric("MarketCap").missing, 2);
        assert_eq!(stats.for_metric("GovernanceRating").unmatched_labels, 1);
        assert_eq!(stats.for_metric("ESGScore"), MetricQuality::default());
        assert!(stats.summary().contains("3 substitutions"));
    }
}
