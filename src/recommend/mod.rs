//! Recommendation service and graph assembly.
//!
//! [`Recommender`] is the computational entry point: it ranks the dataset
//! snapshot against the affected company and hands the ranking to
//! [`ResultAssembler`], which produces the node/edge graph and the
//! recommendation table.

mod assembler;
mod service;

pub use assembler::{
    round2, EdgeData, EdgeMode, GraphEdge, GraphNode, NodeData, RecommendationEntry,
    RecommendationGraph, ResultAssembler,
};
pub use service::{FactorListing, RecommendationRequest, RecommendationResult, Recommender};
