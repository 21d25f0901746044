//! Triple export command handler.

use crate::config::AppConfig;
use crate::export::export_turtle;
use crate::ingest::DatasetFormat;
use crate::pipeline::{load_dataset_or_demo, write_output, OutputTarget};
use anyhow::Result;

/// Export the dataset as Turtle to the configured output.
pub fn run_export_triples(
    config: &AppConfig,
    dataset_format: Option<DatasetFormat>,
    base_uri: &str,
) -> Result<()> {
    let loaded = load_dataset_or_demo(&config.dataset, dataset_format)?;
    let turtle = export_turtle(&loaded.dataset, &config.metrics, base_uri)?;
    write_output(
        turtle.trim_end(),
        &OutputTarget::from_option(config.output.file.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URI;
    use tempfile::TempDir;

    #[test]
    fn test_export_demo_to_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("companies.ttl");
        let mut config = AppConfig::default();
        config.output.file = Some(out.clone());

        run_export_triples(&config, None, DEFAULT_BASE_URI).unwrap();

        let turtle = std::fs::read_to_string(out).unwrap();
        assert!(turtle.starts_with("@prefix ex:"));
        assert_eq!(turtle.matches("a ex:Company").count(), 3);
    }

    #[test]
    fn test_export_rejects_bad_base() {
        let config = AppConfig::default();
        assert!(run_export_triples(&config, None, "ftp://example.org/").is_err());
    }
}
