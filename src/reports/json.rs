//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::recommend::{
    EdgeMode, FactorListing, GraphEdge, GraphNode, RecommendationEntry, RecommendationResult,
};
use crate::scoring::{DataQualityStats, ScoringMode};
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

const SCORE_SEMANTICS: &str =
    "Total Score is a distance rounded to 2 decimals: lower means a closer match";

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_recommendation_report(
        &self,
        result: &RecommendationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonRecommendationReport {
            metadata: JsonReportMetadata::new(config),
            request: RequestInfo {
                company: &result.affected,
                factors: &result.factors,
                mode: result.mode,
                edge_mode: result.edge_mode,
            },
            score_semantics: SCORE_SEMANTICS,
            nodes: &result.graph.nodes,
            edges: &result.graph.edges,
            recommendations: &result.graph.recommendations,
            data_quality: config.include_data_quality.then_some(&result.data_quality),
        };
        self.render(&report)
    }

    fn generate_factor_report(
        &self,
        listing: &FactorListing,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonFactorReport {
            metadata: JsonReportMetadata::new(config),
            companies: &listing.companies,
            factors: &listing.factors,
            factor_info: &listing.factor_info,
        };
        self.render(&report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON structures
// ============================================================================

#[derive(Serialize)]
struct JsonRecommendationReport<'a> {
    metadata: JsonReportMetadata,
    request: RequestInfo<'a>,
    score_semantics: &'static str,
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
    recommendations: &'a [RecommendationEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    data_quality: Option<&'a DataQualityStats>,
}

#[derive(Serialize)]
struct JsonFactorReport<'a> {
    metadata: JsonReportMetadata,
    companies: &'a [String],
    factors: &'a [String],
    factor_info: &'a IndexMap<String, String>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    dataset: String,
}

impl JsonReportMetadata {
    fn new(config: &ReportConfig) -> Self {
        Self {
            tool: ToolInfo {
                name: "partner-finder".to_string(),
                version: if config.metadata.tool_version.is_empty() {
                    env!("CARGO_PKG_VERSION").to_string()
                } else {
                    config.metadata.tool_version.clone()
                },
            },
            generated_at: Utc::now().to_rfc3339(),
            title: config.title.clone(),
            dataset: config
                .metadata
                .dataset
                .clone()
                .unwrap_or_else(|| "built-in demo".to_string()),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct RequestInfo<'a> {
    company: &'a str,
    factors: &'a [String],
    mode: ScoringMode,
    edge_mode: EdgeMode,
}
