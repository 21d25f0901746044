//! Dataset ingestion.
//!
//! Loading happens before the ranking core is invoked; everything here
//! produces a deduplicated, immutable [`Dataset`].

mod csv;
mod json;
mod split;

pub use self::csv::{load_csv, read_wide_csv, IDENTIFIER_COLUMN};
pub use self::json::{load_json, read_json};
pub use self::split::load_split_csv;

use crate::error::{ErrorContext, Result};
use crate::model::Dataset;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk dataset layout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetFormat {
    /// One wide CSV file, a row per company
    #[default]
    Csv,
    /// A JSON array of company objects
    Json,
    /// A directory of per-attribute CSV files joined on `CompanyID`
    SplitCsv,
}

impl DatasetFormat {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::SplitCsv => "split-csv",
        }
    }

    /// Guess the format from a path: directories are split CSV, `.json`
    /// files are JSON, anything else is wide CSV.
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            return Self::SplitCsv;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

impl std::fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Load a dataset in the given format.
pub fn load_dataset(path: &Path, format: DatasetFormat) -> Result<Dataset> {
    tracing::info!("Loading {} dataset from {}", format, path.display());
    let records = match format {
        DatasetFormat::Csv => load_csv(path),
        DatasetFormat::Json => load_json(path),
        DatasetFormat::SplitCsv => load_split_csv(path),
    }
    .with_context(|| format!("loading {format} dataset"))?;

    let dataset = Dataset::from_records(records);
    tracing::info!("Loaded {} companies", dataset.len());
    Ok(dataset)
}
