//! Builds the visualization-ready node/edge graph from a ranking.

use crate::model::{MetricCatalog, RawValue};
use crate::scoring::{CleanedRow, DistanceResult, Ranking};
use clap::ValueEnum;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How edges between the affected company and its matches are labeled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMode {
    /// One edge per (match, selected factor), labeled with the factor name
    #[default]
    PerFactorEdges,
    /// One edge per match, labeled with the distance
    SingleDistanceEdge,
}

impl EdgeMode {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PerFactorEdges => "per-factor-edges",
            Self::SingleDistanceEdge => "single-distance-edge",
        }
    }
}

impl std::fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
}

/// A graph node, wrapped in `data` for graph-rendering front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub data: NodeData,
}

impl GraphNode {
    fn company(id: &str) -> Self {
        Self {
            data: NodeData {
                id: id.to_string(),
                label: id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// A graph edge from the affected company to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub data: EdgeData,
}

/// One recommended company with its cleaned raw values for the selected factors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    pub company: String,
    /// Column header -> cleaned raw value, in selection order
    #[serde(flatten)]
    pub values: IndexMap<String, RawValue>,
    /// The distance rounded to 2 decimals. Lower is closer: this is not a
    /// similarity score.
    #[serde(rename = "Total Score")]
    pub total_score: f64,
}

/// Nodes, edges and the recommendation table for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub recommendations: Vec<RecommendationEntry>,
}

impl RecommendationGraph {
    /// Identifier of the affected company (the first node).
    #[must_use]
    pub fn affected(&self) -> Option<&str> {
        self.nodes.first().map(|n| n.data.id.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Round to 2 decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Turns ranked distances into a [`RecommendationGraph`].
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler<'a> {
    catalog: &'a MetricCatalog,
    edge_mode: EdgeMode,
}

impl<'a> ResultAssembler<'a> {
    #[must_use]
    pub const fn new(catalog: &'a MetricCatalog, edge_mode: EdgeMode) -> Self {
        Self { catalog, edge_mode }
    }

    /// Assemble the graph for a ranking.
    #[must_use]
    pub fn assemble_ranking(&self, ranking: &Ranking) -> RecommendationGraph {
        self.assemble(
            ranking.affected_id(),
            ranking.results(),
            ranking.factors(),
            ranking.cleaned_rows(),
        )
    }

    /// Assemble the graph from its parts.
    ///
    /// The affected company is always the first node, even with no matches.
    /// Node order after it mirrors `ranked`, as does the recommendation list.
    #[must_use]
    pub fn assemble(
        &self,
        affected: &str,
        ranked: &[DistanceResult],
        factors: &[String],
        rows: &IndexMap<String, CleanedRow>,
    ) -> RecommendationGraph {
        let mut graph = RecommendationGraph {
            nodes: Vec::with_capacity(ranked.len() + 1),
            edges: Vec::new(),
            recommendations: Vec::with_capacity(ranked.len()),
        };
        graph.nodes.push(GraphNode::company(affected));

        for result in ranked {
            graph.nodes.push(GraphNode::company(&result.company));

            match self.edge_mode {
                EdgeMode::PerFactorEdges => {
                    for factor in factors {
                        graph.edges.push(edge(affected, &result.company, factor.clone()));
                    }
                }
                EdgeMode::SingleDistanceEdge => {
                    graph.edges.push(edge(
                        affected,
                        &result.company,
                        format!("{:.2}", round2(result.distance)),
                    ));
                }
            }

            let row = rows.get(&result.company);
            let values = factors
                .iter()
                .filter_map(|factor| {
                    let value = row.and_then(|r| r.get(factor))?;
                    Some((self.column(factor), value.clone()))
                })
                .collect();

            graph.recommendations.push(RecommendationEntry {
                company: result.company.clone(),
                values,
                total_score: round2(result.distance),
            });
        }

        graph
    }

    /// Header used for a factor in the recommendation table.
    #[must_use]
    pub fn column(&self, factor: &str) -> String {
        self.catalog
            .get(factor)
            .map_or_else(|| factor.to_string(), |def| def.column().to_string())
    }
}

fn edge(source: &str, target: &str, label: String) -> GraphEdge {
    GraphEdge {
        data: EdgeData {
            source: source.to_string(),
            target: target.to_string(),
            label,
        },
    }
}
