//! Recommend command handler.
//!
//! Implements the `recommend` subcommand: load, rank, report.

use crate::config::AppConfig;
use crate::ingest::DatasetFormat;
use crate::pipeline::{exit_codes, load_dataset_or_demo, output_recommendations, PipelineError};
use crate::recommend::{RecommendationRequest, Recommender};
use crate::reports::ReportConfig;
use anyhow::{bail, Result};

/// Run the recommend command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_recommend(
    config: &AppConfig,
    request: &RecommendationRequest,
    dataset_format: Option<DatasetFormat>,
) -> Result<i32> {
    let loaded = load_dataset_or_demo(&config.dataset, dataset_format)?;
    let recommender = Recommender::new(config, loaded.dataset)?;

    let result = recommender
        .recommend(request)
        .map_err(|e| PipelineError::RecommendFailed { source: e.into() })?;

    let report_config = ReportConfig::for_dataset(loaded.source);
    output_recommendations(&config.output, &result, &report_config)?;

    if result.graph.is_empty() {
        tracing::info!("No companies matched {}", result.affected);
        Ok(exit_codes::NO_RECOMMENDATIONS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Parse a `FACTOR=VALUE` threshold argument.
pub fn parse_threshold(arg: &str) -> Result<(String, f64)> {
    let Some((factor, value)) = arg.split_once('=') else {
        bail!("expected FACTOR=VALUE, got '{arg}'");
    };
    let factor = factor.trim();
    if factor.is_empty() {
        bail!("missing factor name in '{arg}'");
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a number", value.trim()))?;
    if !value.is_finite() {
        bail!("threshold for {factor} must be finite");
    }
    Ok((factor.to_string(), value))
}
