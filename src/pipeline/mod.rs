//! Pipeline orchestration for partner-finder commands.
//!
//! Shared load → recommend → report logic, keeping the CLI command
//! handlers thin.

mod load;
mod output;
mod report_stage;

pub use load::{load_dataset_or_demo, resolve_dataset_format, LoadedDataset};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use report_stage::{output_factor_listing, output_recommendations};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse the dataset
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// The recommendation request was rejected or failed
    #[error("Recommendation failed: {source}")]
    RecommendFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Process exit codes for scripting
pub mod exit_codes {
    /// Success - at least one recommendation (or a non-ranking command)
    pub const SUCCESS: i32 = 0;
    /// The request succeeded but nothing matched
    pub const NO_RECOMMENDATIONS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
