//! Dataset loading stage.

use super::PipelineError;
use crate::config::DatasetConfig;
use crate::ingest::{load_dataset, DatasetFormat};
use crate::model::Dataset;
use anyhow::Result;
use std::path::Path;

/// A loaded dataset and where it came from.
#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// Display name of the source; `None` for the built-in demo
    pub source: Option<String>,
}

/// Pick the dataset format: an explicit choice wins, then a non-default
/// configured format, then detection from the path.
#[must_use]
pub fn resolve_dataset_format(
    explicit: Option<DatasetFormat>,
    configured: DatasetFormat,
    path: &Path,
) -> DatasetFormat {
    explicit.unwrap_or_else(|| {
        if configured == DatasetFormat::default() {
            DatasetFormat::detect(path)
        } else {
            configured
        }
    })
}

/// Load the configured dataset, or the built-in demo when no path is set.
pub fn load_dataset_or_demo(
    config: &DatasetConfig,
    explicit_format: Option<DatasetFormat>,
) -> Result<LoadedDataset> {
    let Some(path) = config.path.as_deref() else {
        tracing::info!("No dataset given, using the built-in demo dataset");
        return Ok(LoadedDataset {
            dataset: Dataset::demo(),
            source: None,
        });
    };

    let format = resolve_dataset_format(explicit_format, config.format, path);
    let dataset = load_dataset(path, format).map_err(|e| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if dataset.is_empty() {
        tracing::warn!("Dataset {} contains no companies", path.display());
    }

    Ok(LoadedDataset {
        dataset,
        source: Some(path.display().to_string()),
    })
}
