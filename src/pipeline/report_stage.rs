//! Report output stage.
//!
//! Handles generating and writing recommendation and factor reports.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget, PipelineError};
use crate::config::OutputConfig;
use crate::recommend::{FactorListing, RecommendationResult};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat};
use anyhow::Result;

/// Output a recommendation report to the configured destination.
pub fn output_recommendations(
    output: &OutputConfig,
    result: &RecommendationResult,
    report_config: &ReportConfig,
) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    let format = auto_detect_format(output.format, &target);
    tracing::debug!("Rendering recommendations as {}", format);

    let reporter = create_reporter_with_options(format, should_use_color(output.no_color));
    let report = reporter
        .generate_recommendation_report(result, report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&report, &target)
}

/// Output the factor listing. `Auto` renders JSON regardless of the terminal.
pub fn output_factor_listing(
    output: &OutputConfig,
    listing: &FactorListing,
    report_config: &ReportConfig,
) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    let format = match output.format {
        ReportFormat::Auto => ReportFormat::Json,
        other => other,
    };

    let reporter = create_reporter_with_options(format, should_use_color(output.no_color));
    let report = reporter
        .generate_factor_report(listing, report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    write_output(&report, &target)
}
