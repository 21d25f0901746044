//! Factors command handler.

use crate::config::AppConfig;
use crate::ingest::DatasetFormat;
use crate::pipeline::{load_dataset_or_demo, output_factor_listing};
use crate::recommend::Recommender;
use crate::reports::ReportConfig;
use anyhow::Result;

/// List the companies in the dataset and the configured factors.
pub fn run_factors(config: &AppConfig, dataset_format: Option<DatasetFormat>) -> Result<()> {
    let loaded = load_dataset_or_demo(&config.dataset, dataset_format)?;
    let recommender = Recommender::new(config, loaded.dataset)?;
    let listing = recommender.list_available_factors();

    tracing::debug!(
        "{} companies, {} factors",
        listing.companies.len(),
        listing.factors.len()
    );
    output_factor_listing(
        &config.output,
        &listing,
        &ReportConfig::for_dataset(loaded.source),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_factors_with_dataset() {
        let tmp = TempDir::new().unwrap();
        let dataset = tmp.path().join("companies.csv");
        std::fs::write(&dataset, "company,ESGScore\nAcme,40\nGlobex,70\n").unwrap();
        let out = tmp.path().join("factors.json");

        let mut config = AppConfig::default();
        config.dataset.path = Some(dataset);
        config.output.file = Some(out.clone());

        run_factors(&config, None).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["companies"], serde_json::json!(["Acme", "Globex"]));
        assert_eq!(value["factors"].as_array().unwrap().len(), 5);
        assert_eq!(value["factor_info"]["RiskLevel"], "Low/Medium Risk");
    }
}
