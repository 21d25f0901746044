//! **Partner company recommendation by weighted metric distance.**
//!
//! `partner-finder` ranks the companies of a dataset by how close they are to
//! an "affected" company over a caller-selected subset of business metrics
//! (stock price, ESG score, governance rating, risk level, market cap, or any
//! metric you configure). It powers both a command-line interface and a Rust
//! library for programmatic integration.
//!
//! ## Key Features
//!
//! - **Normalization**: Heterogeneous raw values (numbers on different
//!   scales, categorical labels) are mapped onto a common 0-100 scale by a
//!   configurable [`MetricCatalog`].
//! - **Configurable distance**: Plain Euclidean distance, or an asymmetric
//!   penalty that pushes away candidates outperforming the affected company.
//!   Per-factor weights are supported.
//! - **Visualization-ready output**: Results come as a node/edge graph plus a
//!   recommendation table with rounded total scores.
//! - **Data-quality accounting**: Missing values, unparseable numbers and
//!   unmatched labels are substituted and counted, never fatal.
//! - **Ingestion and export**: Wide CSV, JSON and split per-attribute CSV
//!   datasets; Turtle export of the raw dataset.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Dataset`] snapshots of [`CompanyRecord`]s and the
//!   [`MetricCatalog`].
//! - **[`scoring`]**: Normalization, missing-value cleaning, distance and the
//!   [`RankingEngine`].
//! - **[`recommend`]**: The [`Recommender`] service and graph assembly.
//! - **[`ingest`]** / **[`export`]**: Dataset loading and Turtle export.
//! - **[`reports`]**: JSON, CSV, table and summary reports.
//! - **[`config`]**: Configuration, presets, validation and YAML discovery.
//!
//! ## Getting Started
//!
//! ```no_run
//! use partner_finder::{AppConfig, Dataset, Recommender};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let recommender = Recommender::new(&AppConfig::default(), Dataset::demo())?;
//!     let graph = recommender.compute_recommendations(
//!         "Samsung",
//!         &["stockPrice".to_string(), "ESGScore".to_string()],
//!     )?;
//!
//!     for entry in &graph.recommendations {
//!         println!("{}: {:.2}", entry.company, entry.total_score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Loading a dataset and using request extras
//!
//! ```no_run
//! use partner_finder::ingest::{load_dataset, DatasetFormat};
//! use partner_finder::{AppConfig, RecommendationRequest, Recommender};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_dataset(Path::new("companies.csv"), DatasetFormat::Csv)?;
//!     let recommender = Recommender::new(&AppConfig::default(), dataset)?;
//!
//!     let request = RecommendationRequest::new("Acme", ["ESGScore", "MarketCap"])
//!         .with_threshold("ESGScore", 60.0)
//!         .with_limit(Some(5));
//!     let result = recommender.recommend(&request)?;
//!     println!("{} matches", result.graph.recommendations.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `partner-finder` library crate. For the
//! command-line tool, run `partner-finder --help`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counts and widths are bounded in practice
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod recommend;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, PartnerError, Result};
pub use model::{CompanyRecord, Dataset, DatasetHandle, MetricCatalog, RawValue};
pub use recommend::{
    EdgeMode, FactorListing, RecommendationGraph, RecommendationRequest, RecommendationResult,
    Recommender,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{DataQualityStats, RankingEngine, ScoringMode};
