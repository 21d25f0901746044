//! The recommendation service: the entry point collaborators call.

use super::{EdgeMode, RecommendationGraph, ResultAssembler};
use crate::config::{AppConfig, GraphConfig, ScoringConfig, Validatable};
use crate::error::{PartnerError, Result};
use crate::model::{Dataset, DatasetHandle, MetricCatalog, RawValue};
use crate::scoring::{DataQualityStats, RankingEngine, ScoringMode};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Companies and factors available for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorListing {
    pub companies: Vec<String>,
    pub factors: Vec<String>,
    /// Metric name -> human label
    pub factor_info: IndexMap<String, String>,
}

/// A recommendation request with its optional extras.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub company: String,
    pub factors: Vec<String>,
    /// Factor -> minimum cleaned raw value a match must reach
    pub thresholds: IndexMap<String, f64>,
    /// Keep only the N closest matches (after thresholds)
    pub limit: Option<usize>,
    /// Overrides the configured scoring mode
    pub mode: Option<ScoringMode>,
    /// Overrides the configured edge mode
    pub edge_mode: Option<EdgeMode>,
}

impl RecommendationRequest {
    pub fn new<I, S>(company: impl Into<String>, factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            company: company.into(),
            factors: factors.into_iter().map(Into::into).collect(),
            thresholds: IndexMap::new(),
            limit: None,
            mode: None,
            edge_mode: None,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, factor: impl Into<String>, min: f64) -> Self {
        self.thresholds.insert(factor.into(), min);
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: Option<ScoringMode>) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_edge_mode(mut self, edge_mode: Option<EdgeMode>) -> Self {
        self.edge_mode = edge_mode;
        self
    }
}

/// Outcome of one request: the graph plus what produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub affected: String,
    /// Validated, deduplicated factor selection
    pub factors: Vec<String>,
    /// Table header per selected factor, in selection order
    pub columns: Vec<String>,
    pub mode: ScoringMode,
    pub edge_mode: EdgeMode,
    pub graph: RecommendationGraph,
    pub data_quality: DataQualityStats,
}

/// Serves recommendation requests against a swappable dataset snapshot.
///
/// Catalog and scoring configuration are fixed at construction. Each request
/// takes its own snapshot of the dataset, so a concurrent [`Recommender::reload`]
/// never affects a request in flight.
#[derive(Debug)]
pub struct Recommender {
    catalog: MetricCatalog,
    scoring: ScoringConfig,
    graph: GraphConfig,
    dataset: DatasetHandle,
}

impl Recommender {
    /// Validate the configuration and wrap the initial dataset.
    pub fn new(config: &AppConfig, dataset: Dataset) -> Result<Self> {
        config.ensure_valid()?;
        tracing::info!(
            "Recommender ready: {} companies, {} metrics, {} scoring",
            dataset.len(),
            config.metrics.len(),
            config.scoring.mode
        );
        Ok(Self {
            catalog: config.metrics.clone(),
            scoring: config.scoring.clone(),
            graph: config.graph.clone(),
            dataset: DatasetHandle::new(dataset),
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// The current dataset snapshot.
    #[must_use]
    pub fn dataset(&self) -> Arc<Dataset> {
        self.dataset.snapshot()
    }

    /// Swap in a new dataset, returning the previous snapshot.
    pub fn reload(&self, dataset: Dataset) -> Arc<Dataset> {
        self.dataset.replace(dataset)
    }

    /// Companies in dataset order plus every configured factor and its label.
    #[must_use]
    pub fn list_available_factors(&self) -> FactorListing {
        let snapshot = self.dataset.snapshot();
        FactorListing {
            companies: snapshot.company_ids().map(ToString::to_string).collect(),
            factors: self.catalog.names().map(ToString::to_string).collect(),
            factor_info: self
                .catalog
                .iter()
                .map(|(name, def)| (name.to_string(), def.label.clone()))
                .collect(),
        }
    }

    /// Rank matches for `company` over `factors` with the configured defaults.
    pub fn compute_recommendations(
        &self,
        company: &str,
        factors: &[String],
    ) -> Result<RecommendationGraph> {
        let request = RecommendationRequest::new(company, factors.iter().cloned());
        self.recommend(&request).map(|result| result.graph)
    }

    /// Serve a full request.
    ///
    /// Fails atomically: on `NotFound` or `InvalidFactor` nothing is assembled.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        let snapshot = self.dataset.snapshot();
        let mode = request.mode.unwrap_or(self.scoring.mode);
        let edge_mode = request.edge_mode.unwrap_or(self.graph.edge_mode);
        let limit = request.limit.or(self.graph.limit);

        let engine = RankingEngine::new(&self.catalog, &self.scoring).with_mode(mode);
        let mut ranking = engine.rank_dataset(&snapshot, &request.company, &request.factors)?;

        for (factor, min) in &request.thresholds {
            if !ranking.factors().contains(factor) {
                return Err(PartnerError::invalid_factor(
                    factor,
                    "threshold given for a factor that is not selected",
                ));
            }
            if !min.is_finite() {
                return Err(PartnerError::invalid_factor(
                    factor,
                    format!("threshold must be a finite number, got {min}"),
                ));
            }
        }

        if limit == Some(0) {
            return Err(PartnerError::configuration("limit must be at least 1"));
        }

        if !request.thresholds.is_empty() {
            let before = ranking.len();
            ranking.retain(|_, row| meets_thresholds(row, &request.thresholds));
            tracing::debug!(
                "Thresholds dropped {} of {} matches",
                before - ranking.len(),
                before
            );
        }
        if let Some(limit) = limit {
            ranking.truncate(limit);
        }

        let assembler = ResultAssembler::new(&self.catalog, edge_mode);
        let graph = assembler.assemble_ranking(&ranking);
        tracing::info!(
            "{} recommendations for {} over [{}]",
            graph.recommendations.len(),
            request.company,
            ranking.factors().join(", ")
        );

        Ok(RecommendationResult {
            affected: ranking.affected_id().to_string(),
            factors: ranking.factors().to_vec(),
            columns: ranking.factors().iter().map(|f| assembler.column(f)).collect(),
            mode,
            edge_mode,
            data_quality: ranking.data_quality().clone(),
            graph,
        })
    }
}

/// Non-numeric values never fail a threshold.
fn meets_thresholds(row: &IndexMap<String, RawValue>, thresholds: &IndexMap<String, f64>) -> bool {
    thresholds.iter().all(|(factor, min)| {
        row.get(factor)
            .and_then(RawValue::as_number)
            .map_or(true, |value| value >= *min)
    })
}
