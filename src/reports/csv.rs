//! CSV report generator.
//!
//! Emits the recommendation table (one row per match, in rank order),
//! suitable for spreadsheet import.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::recommend::{FactorListing, RecommendationResult};

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_recommendation_report(
        &self,
        result: &RecommendationResult,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = Vec::with_capacity(result.columns.len() + 2);
        header.push("company");
        header.extend(result.columns.iter().map(String::as_str));
        header.push("Total Score");
        writer.write_record(&header)?;

        for entry in &result.graph.recommendations {
            let mut record = Vec::with_capacity(header.len());
            record.push(entry.company.clone());
            for column in &result.columns {
                record.push(
                    entry
                        .values
                        .get(column)
                        .map_or_else(String::new, ToString::to_string),
                );
            }
            record.push(format!("{:.2}", entry.total_score));
            writer.write_record(&record)?;
        }

        finish(writer)
    }

    fn generate_factor_report(
        &self,
        listing: &FactorListing,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["factor", "label"])?;
        for (factor, label) in &listing.factor_info {
            writer.write_record([factor, label])?;
        }
        finish(writer)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::demo_result;
    use indexmap::IndexMap;

    #[test]
    fn test_recommendation_table() {
        let result = demo_result();
        let csv = CsvReporter::new()
            .generate_recommendation_report(&result, &ReportConfig::default())
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("company,"));
        assert!(lines[0].ends_with(",Total Score"));
        assert!(lines[1].starts_with("Microsoft,"));
        assert!(lines[1].ends_with(",11.18"));
        assert!(lines[2].starts_with("Apple,"));
        assert!(lines[2].ends_with(",25.00"));
    }

    #[test]
    fn test_factor_table_quotes_commas() {
        let listing = FactorListing {
            companies: vec![],
            factors: vec!["MarketCap".into()],
            factor_info: IndexMap::from([(
                "MarketCap".to_string(),
                "Market Cap, USD".to_string(),
            )]),
        };
        let csv = CsvReporter::new()
            .generate_factor_report(&listing, &ReportConfig::default())
            .unwrap();
        assert_eq!(csv, "factor,label\nMarketCap,\"Market Cap, USD\"\n");
    }
}
