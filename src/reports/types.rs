//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: table if TTY, JSON otherwise
    #[default]
    Auto,
    /// Structured JSON output (nodes, edges, recommendations)
    Json,
    /// CSV recommendation table for spreadsheet import
    Csv,
    /// Aligned table for terminal (colored)
    Table,
    /// Brief summary output
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
    /// Include the data-quality breakdown
    pub include_data_quality: bool,
}

impl ReportConfig {
    /// Report config carrying the dataset location.
    pub fn for_dataset(dataset: Option<String>) -> Self {
        Self {
            title: None,
            metadata: ReportMetadata {
                dataset,
                ..ReportMetadata::new()
            },
            include_data_quality: true,
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Dataset file or directory (None for the built-in demo dataset)
    pub dataset: Option<String>,
    /// Tool version (the crate version when empty)
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
