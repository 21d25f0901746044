//! Report generation for recommendation results.
//!
//! This module provides multiple output formats:
//! - JSON: the full node/edge graph for programmatic integration
//! - CSV: the recommendation table for spreadsheet import
//! - Table: aligned tabular terminal output
//! - Summary: compact shell-friendly output

mod csv;
mod json;
mod summary;
mod types;

pub use self::csv::CsvReporter;
pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::recommend::{FactorListing, RecommendationResult};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<::csv::Error> for ReportError {
    fn from(err: ::csv::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report for one recommendation request
    fn generate_recommendation_report(
        &self,
        result: &RecommendationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a report listing selectable companies and factors
    fn generate_factor_report(
        &self,
        listing: &FactorListing,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a recommendation report to a writer
    fn write_recommendation_report(
        &self,
        result: &RecommendationResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_recommendation_report(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
///
/// `Auto` should be resolved by the caller; if it reaches here it renders
/// as a table.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::AppConfig;
    use crate::model::Dataset;
    use crate::recommend::{RecommendationRequest, RecommendationResult, Recommender};

    /// Samsung over stock price and ESG score on the demo dataset.
    pub fn demo_result() -> RecommendationResult {
        let recommender = Recommender::new(&AppConfig::default(), Dataset::demo()).unwrap();
        recommender
            .recommend(&RecommendationRequest::new(
                "Samsung",
                ["stockPrice", "ESGScore"],
            ))
            .unwrap()
    }
}
