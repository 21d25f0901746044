//! Configuration types for partner-finder.
//!
//! Provides structured configuration for scoring, graph assembly, the metric
//! catalog, dataset loading and report output.

use crate::ingest::DatasetFormat;
use crate::model::MetricCatalog;
use crate::recommend::EdgeMode;
use crate::reports::ReportFormat;
use crate::scoring::{FactorWeights, MissingValuePolicy, ScoringMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Loaded once at startup and validated before any request is served (see
/// [`super::Validatable`]). Read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Distance semantics, weights and missing-value policy
    pub scoring: ScoringConfig,
    /// Node/edge graph assembly
    pub graph: GraphConfig,
    /// Metric catalog: name -> label, column header and normalization spec
    pub metrics: MetricCatalog,
    /// Dataset source
    pub dataset: DatasetConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the scoring mode.
    pub const fn scoring_mode(mut self, mode: ScoringMode) -> Self {
        self.config.scoring.mode = mode;
        self
    }

    /// Set the weight of one factor.
    pub fn factor_weight(mut self, factor: impl Into<String>, weight: f64) -> Self {
        self.config.scoring.factor_weights.0.insert(factor.into(), weight);
        self
    }

    /// Set the missing-value policy.
    pub fn missing_values(mut self, policy: MissingValuePolicy) -> Self {
        self.config.scoring.missing = policy;
        self
    }

    /// Set the edge labeling mode.
    pub const fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.config.graph.edge_mode = mode;
        self
    }

    /// Keep at most `limit` recommendations.
    pub const fn limit(mut self, limit: Option<usize>) -> Self {
        self.config.graph.limit = limit;
        self
    }

    /// Replace the metric catalog.
    pub fn metrics(mut self, catalog: MetricCatalog) -> Self {
        self.config.metrics = catalog;
        self
    }

    /// Set the dataset path.
    pub fn dataset_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.dataset.path = path;
        self
    }

    /// Set the dataset format.
    pub const fn dataset_format(mut self, format: DatasetFormat) -> Self {
        self.config.dataset.format = format;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Scoring configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Distance semantics
    pub mode: ScoringMode,
    /// Per-factor weights; unlisted factors weigh 1.0
    #[serde(skip_serializing_if = "FactorWeights::is_empty")]
    pub factor_weights: FactorWeights,
    /// Substitutes for absent or unparseable values
    pub missing: MissingValuePolicy,
}

/// Graph assembly configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GraphConfig {
    /// One edge per selected factor, or one edge carrying the distance
    pub edge_mode: EdgeMode,
    /// Keep only the N closest companies
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub limit: Option<usize>,
}

/// Dataset source configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset file or directory (None uses the built-in demo dataset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Dataset layout
    pub format: DatasetFormat,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}
