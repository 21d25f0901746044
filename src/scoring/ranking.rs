//! Ranking engine: normalize every company, measure distance to the
//! affected company, sort ascending.

use super::{
    normalize_tracked, weighted_distance, DataQualityStats, NormalizedScoreVector, ScoringMode,
};
use crate::config::ScoringConfig;
use crate::error::{PartnerError, Result};
use crate::model::{CompanyRecord, Dataset, MetricCatalog, RawValue};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

/// Candidate count above which distances are computed in parallel.
const PARALLEL_THRESHOLD: usize = 256;

/// Cleaned raw values for one company, keyed by metric name.
pub type CleanedRow = IndexMap<String, RawValue>;

/// Distance from the affected company to one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceResult {
    pub company: String,
    /// Lower is closer
    pub distance: f64,
}

/// A company after missing-value cleaning and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCompany {
    pub id: String,
    /// Cleaned raw values for every catalog metric
    pub cleaned: CleanedRow,
    /// Normalized scores for every catalog metric
    pub scores: NormalizedScoreVector,
}

/// Ranking engine bound to a metric catalog and scoring configuration.
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine<'a> {
    catalog: &'a MetricCatalog,
    scoring: &'a ScoringConfig,
    mode: ScoringMode,
}

impl<'a> RankingEngine<'a> {
    /// Create an engine using the configured scoring mode.
    #[must_use]
    pub const fn new(catalog: &'a MetricCatalog, scoring: &'a ScoringConfig) -> Self {
        Self {
            catalog,
            scoring,
            mode: scoring.mode,
        }
    }

    /// Override the scoring mode for this engine.
    #[must_use]
    pub const fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Check a factor selection against the catalog.
    ///
    /// Returns the selection with duplicates removed, first occurrence kept.
    pub fn validate_factors(&self, factors: &[String]) -> Result<Vec<String>> {
        if factors.is_empty() {
            return Err(PartnerError::invalid_factor(
                "",
                "at least one factor must be selected",
            ));
        }
        let mut selected: Vec<String> = Vec::with_capacity(factors.len());
        for factor in factors {
            if !self.catalog.contains(factor) {
                return Err(PartnerError::invalid_factor(
                    factor,
                    format!(
                        "not a configured metric (known: {})",
                        self.catalog.names().collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
            if !selected.contains(factor) {
                selected.push(factor.clone());
            }
        }
        Ok(selected)
    }

    /// Clean and normalize every catalog metric of one record.
    pub fn normalize_company(
        &self,
        record: &CompanyRecord,
        stats: &mut DataQualityStats,
    ) -> NormalizedCompany {
        let policy = &self.scoring.missing;
        let mut cleaned = CleanedRow::with_capacity(self.catalog.len());
        let mut scores = NormalizedScoreVector::new();

        for (metric, definition) in self.catalog.iter() {
            let outcome = policy.clean(record.get(metric), &definition.spec);
            let normalized = normalize_tracked(&outcome.value, &definition.spec);

            if let Some(kind) = outcome.substitution {
                tracing::debug!(
                    "{}: {} {:?}, substituted {}",
                    record.id,
                    metric,
                    kind,
                    outcome.value
                );
                stats.record_substitution(metric, kind);
            } else if normalized.fallback {
                tracing::debug!(
                    "{}: {} label '{}' not in table, scored {}",
                    record.id,
                    metric,
                    outcome.value,
                    normalized.score
                );
                stats.record_unmatched_label(metric);
            }

            scores.insert(metric, normalized.score);
            cleaned.insert(metric.to_string(), outcome.value);
        }

        NormalizedCompany {
            id: record.id.clone(),
            cleaned,
            scores,
        }
    }

    /// Rank every company against the affected one.
    ///
    /// All catalog metrics are normalized for every company regardless of the
    /// selection, since the cleaned values are needed for display. Distance
    /// uses only `factors`. The result is sorted ascending by distance; ties
    /// keep input order.
    pub fn rank(
        &self,
        companies: &[CompanyRecord],
        affected_id: &str,
        factors: &[String],
    ) -> Result<Ranking> {
        let affected_pos = companies
            .iter()
            .position(|c| c.id == affected_id)
            .ok_or_else(|| PartnerError::not_found(affected_id))?;
        let factors = self.validate_factors(factors)?;

        let mut stats = DataQualityStats::default();
        let normalized: Vec<NormalizedCompany> = companies
            .iter()
            .map(|c| self.normalize_company(c, &mut stats))
            .collect();
        let affected = &normalized[affected_pos];

        let candidates: Vec<&NormalizedCompany> =
            normalized.iter().filter(|c| c.id != affected_id).collect();
        let measure = |company: &&NormalizedCompany| -> Result<DistanceResult> {
            let distance = weighted_distance(
                &affected.scores,
                &company.scores,
                &factors,
                self.mode,
                &self.scoring.factor_weights,
            )?;
            Ok(DistanceResult {
                company: company.id.clone(),
                distance,
            })
        };
        // Indexed parallel collect keeps input order
        let mut results: Vec<DistanceResult> = if candidates.len() > PARALLEL_THRESHOLD {
            candidates.par_iter().map(measure).collect::<Result<_>>()?
        } else {
            candidates.iter().map(measure).collect::<Result<_>>()?
        };
        // `sort_by` is stable
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        if stats.is_clean() {
            tracing::debug!("Ranked {} candidates for {}", results.len(), affected_id);
        } else {
            tracing::warn!(
                "Ranked {} candidates for {} with {}",
                results.len(),
                affected_id,
                stats.summary()
            );
        }

        let mut rows = IndexMap::with_capacity(normalized.len());
        let mut scores = IndexMap::with_capacity(normalized.len());
        for company in normalized {
            if !rows.contains_key(&company.id) {
                scores.insert(company.id.clone(), company.scores);
                rows.insert(company.id, company.cleaned);
            }
        }

        Ok(Ranking {
            affected: affected_id.to_string(),
            factors,
            mode: self.mode,
            results,
            rows,
            scores,
            stats,
        })
    }

    /// Rank against a dataset snapshot.
    pub fn rank_dataset(
        &self,
        dataset: &Dataset,
        affected_id: &str,
        factors: &[String],
    ) -> Result<Ranking> {
        self.rank(dataset.records(), affected_id, factors)
    }
}

/// Ranked candidates for one request.
///
/// Request-scoped: each call to [`RankingEngine::rank`] builds a fresh one.
/// [`Ranking::iter`] can be called any number of times.
#[derive(Debug, Clone)]
pub struct Ranking {
    affected: String,
    factors: Vec<String>,
    mode: ScoringMode,
    results: Vec<DistanceResult>,
    rows: IndexMap<String, CleanedRow>,
    scores: IndexMap<String, NormalizedScoreVector>,
    stats: DataQualityStats,
}

impl Ranking {
    pub fn iter(&self) -> std::slice::Iter<'_, DistanceResult> {
        self.results.iter()
    }

    #[must_use]
    pub fn results(&self) -> &[DistanceResult] {
        &self.results
    }

    #[must_use]
    pub fn affected_id(&self) -> &str {
        &self.affected
    }

    /// The validated, deduplicated factor selection.
    #[must_use]
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    #[must_use]
    pub const fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Cleaned raw values of a company (affected company included).
    #[must_use]
    pub fn cleaned_row(&self, company: &str) -> Option<&CleanedRow> {
        self.rows.get(company)
    }

    #[must_use]
    pub const fn cleaned_rows(&self) -> &IndexMap<String, CleanedRow> {
        &self.rows
    }

    /// Normalized scores of a company (affected company included).
    #[must_use]
    pub fn scores(&self, company: &str) -> Option<&NormalizedScoreVector> {
        self.scores.get(company)
    }

    #[must_use]
    pub const fn data_quality(&self) -> &DataQualityStats {
        &self.stats
    }

    /// Keep only results matching `keep`, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&DistanceResult, &CleanedRow) -> bool,
    {
        let rows = &self.rows;
        self.results
            .retain(|r| rows.get(&r.company).is_some_and(|row| keep(r, row)));
    }

    /// Keep at most `limit` closest results.
    pub fn truncate(&mut self, limit: usize) {
        self.results.truncate(limit);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'r> IntoIterator for &'r Ranking {
    type Item = &'r DistanceResult;
    type IntoIter = std::slice::Iter<'r, DistanceResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn rank(
        dataset: &Dataset,
        affected: &str,
        selection: &[&str],
        mode: ScoringMode,
    ) -> Result<Ranking> {
        let catalog = MetricCatalog::builtin();
        let scoring = ScoringConfig::default();
        RankingEngine::new(&catalog, &scoring)
            .with_mode(mode)
            .rank_dataset(dataset, affected, &factors(selection))
    }

    #[test]
    fn test_rank_demo_asymmetric() {
        let ranking = rank(
            &Dataset::demo(),
            "Samsung",
            &["stockPrice", "ESGScore"],
            ScoringMode::AsymmetricPenalty,
        )
        .unwrap();

        let order: Vec<&str> = ranking.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(order, vec!["Microsoft", "Apple"]);
        // Microsoft: +5, +10 -> sqrt(125); Apple: +20, +15 -> sqrt(625)
        assert!((ranking.results()[0].distance - 125.0_f64.sqrt()).abs() < 1e-9);
        assert!((ranking.results()[1].distance - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_affected_excluded() {
        let ranking = rank(
            &Dataset::demo(),
            "Apple",
            &["ESGScore"],
            ScoringMode::Symmetric,
        )
        .unwrap();
        assert_eq!(ranking.len(), 2);
        assert!(ranking.iter().all(|r| r.company != "Apple"));
        assert_eq!(ranking.affected_id(), "Apple");
    }

    #[test]
    fn test_unknown_company_not_found() {
        let err = rank(&Dataset::demo(), "Nokia", &["ESGScore"], ScoringMode::Symmetric)
            .unwrap_err();
        assert!(matches!(err, PartnerError::NotFound { company } if company == "Nokia"));
    }

    #[test]
    fn test_unknown_factor_invalid() {
        let err = rank(&Dataset::demo(), "Apple", &["revenue"], ScoringMode::Symmetric)
            .unwrap_err();
        assert!(matches!(err, PartnerError::InvalidFactor { factor, .. } if factor == "revenue"));
    }

    #[test]
    fn test_empty_selection_invalid() {
        let err = rank(&Dataset::demo(), "Apple", &[], ScoringMode::Symmetric).unwrap_err();
        assert!(matches!(err, PartnerError::InvalidFactor { .. }));
    }

    #[test]
    fn test_duplicate_factors_collapsed() {
        let ranking = rank(
            &Dataset::demo(),
            "Apple",
            &["ESGScore", "ESGScore", "stockPrice"],
            ScoringMode::Symmetric,
        )
        .unwrap();
        assert_eq!(ranking.factors(), &["ESGScore".to_string(), "stockPrice".to_string()]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let dataset = Dataset::from_records([
            CompanyRecord::new("Ref").with_value("ESGScore", 50),
            CompanyRecord::new("First").with_value("ESGScore", 60),
            CompanyRecord::new("Second").with_value("ESGScore", 40),
            CompanyRecord::new("Third").with_value("ESGScore", 60),
        ]);
        let ranking = rank(&dataset, "Ref", &["ESGScore"], ScoringMode::Symmetric).unwrap();
        let order: Vec<&str> = ranking.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(order, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_all_metrics_normalized_even_if_unselected() {
        let ranking = rank(
            &Dataset::demo(),
            "Samsung",
            &["ESGScore"],
            ScoringMode::Symmetric,
        )
        .unwrap();
        let scores = ranking.scores("Apple").unwrap();
        assert_eq!(scores.len(), MetricCatalog::builtin().len());
        assert_eq!(scores.get("GovernanceRating"), Some(90.0));
        assert_eq!(scores.get("RiskLevel"), Some(50.0));
        assert_eq!(scores.get("MarketCap"), Some(0.0));
    }

    #[test]
    fn test_substitution_counts() {
        let ranking = rank(
            &Dataset::demo(),
            "Samsung",
            &["ESGScore"],
            ScoringMode::Symmetric,
        )
        .unwrap();
        let stats = ranking.data_quality();
        // The demo rows carry no MarketCap
        assert_eq!(stats.for_metric("MarketCap").missing, 3);
        assert_eq!(stats.missing, 3);
        assert_eq!(stats.unmatched_labels, 2); // "Medium" and "High" risk
    }

    #[test]
    fn test_source_records_untouched() {
        let dataset = Dataset::demo();
        let before = dataset.get("Apple").cloned();
        let ranking = rank(&dataset, "Apple", &["MarketCap"], ScoringMode::Symmetric).unwrap();
        assert_eq!(dataset.get("Apple").cloned(), before);
        assert_eq!(
            ranking.cleaned_row("Apple").and_then(|r| r.get("MarketCap")),
            Some(&RawValue::Number(0.0))
        );
    }

    #[test]
    fn test_single_company_dataset_yields_empty_ranking() {
        let dataset = Dataset::from_records([CompanyRecord::new("Alone").with_value("ESGScore", 5)]);
        let ranking = rank(&dataset, "Alone", &["ESGScore"], ScoringMode::Symmetric).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_retain_and_truncate() {
        let mut ranking = rank(
            &Dataset::demo(),
            "Samsung",
            &["stockPrice"],
            ScoringMode::Symmetric,
        )
        .unwrap();
        ranking.retain(|_, row| row.get("ESGScore").and_then(RawValue::as_number) >= Some(86.0));
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.results()[0].company, "Apple");
        ranking.truncate(0);
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let ranking = rank(
            &Dataset::demo(),
            "Samsung",
            &["stockPrice"],
            ScoringMode::Symmetric,
        )
        .unwrap();
        let first: Vec<_> = ranking.iter().cloned().collect();
        let second: Vec<_> = (&ranking).into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_dataset_matches_sequential_order() {
        let records: Vec<CompanyRecord> = (0..600)
            .map(|i| CompanyRecord::new(format!("C{i:03}")).with_value("ESGScore", (i * 7) % 101))
            .collect();
        let dataset = Dataset::from_records(records);
        let ranking = rank(&dataset, "C000", &["ESGScore"], ScoringMode::Symmetric).unwrap();

        assert_eq!(ranking.len(), 599);
        assert!(ranking
            .results()
            .windows(2)
            .all(|w| w[0].distance <= w[1].distance));
        // Ties resolved by dataset order
        for pair in ranking.results().windows(2) {
            if pair[0].distance == pair[1].distance {
                assert!(pair[0].company < pair[1].company);
            }
        }
    }
}
