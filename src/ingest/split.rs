//! Split CSV datasets: one file per attribute family joined on `CompanyID`.
//!
//! Expected layout of the directory:
//!
//! | File             | Required | Columns                                          |
//! |------------------|----------|--------------------------------------------------|
//! | `company.csv`    | yes      | `CompanyID`, `CompanyName`, `MarketCap`          |
//! | `esg.csv`        | no       | `CompanyID`, `ESGScore`                          |
//! | `governance.csv` | no       | `CompanyID`, `GovernanceRating` or `GovernanceScore` |
//! | `stock.csv`      | no       | `CompanyID`, `StockPrice`                        |
//! | `risk.csv`       | no       | `CompanyID`, `RiskLevel`                         |
//!
//! The company name becomes the identifier. Missing files, rows or cells
//! leave the metric absent.

use super::csv::{read_table_file, Table};
use crate::error::{IngestErrorKind, PartnerError, Result};
use crate::model::{CompanyRecord, RawValue};
use std::collections::HashMap;
use std::path::Path;

const JOIN_KEY: &str = "CompanyID";
const COMPANY_FILE: &str = "company.csv";

/// An optional attribute file and the metric it feeds.
struct Attribute {
    file: &'static str,
    columns: &'static [&'static str],
    metric: &'static str,
}

const ATTRIBUTES: &[Attribute] = &[
    Attribute {
        file: COMPANY_FILE,
        columns: &["MarketCap"],
        metric: "MarketCap",
    },
    Attribute {
        file: "esg.csv",
        columns: &["ESGScore"],
        metric: "ESGScore",
    },
    Attribute {
        file: "governance.csv",
        columns: &["GovernanceRating", "GovernanceScore"],
        metric: "GovernanceRating",
    },
    Attribute {
        file: "stock.csv",
        columns: &["StockPrice"],
        metric: "stockPrice",
    },
    Attribute {
        file: "risk.csv",
        columns: &["RiskLevel"],
        metric: "RiskLevel",
    },
];

/// Load and join a split CSV directory.
pub fn load_split_csv(dir: &Path) -> Result<Vec<CompanyRecord>> {
    let companies = read_table_file(&dir.join(COMPANY_FILE))?;
    let id_col = require_column(&companies, JOIN_KEY, COMPANY_FILE)?;
    let name_col = companies.column("CompanyName");

    let mut lookups: Vec<(&'static str, HashMap<String, RawValue>)> = Vec::new();
    for attribute in ATTRIBUTES {
        let table = if attribute.file == COMPANY_FILE {
            companies.clone()
        } else {
            let path = dir.join(attribute.file);
            if !path.exists() {
                tracing::debug!("{} not present, {} left absent", attribute.file, attribute.metric);
                continue;
            }
            read_table_file(&path)?
        };
        lookups.push((attribute.metric, attribute_lookup(&table, attribute)?));
    }

    let mut records = Vec::with_capacity(companies.rows.len());
    for (index, row) in companies.rows.iter().enumerate() {
        let key = row.get(id_col).unwrap_or_default();
        let name = name_col.and_then(|c| row.get(c)).unwrap_or_default();
        let id = if name.is_empty() { key } else { name };
        if id.is_empty() {
            return Err(PartnerError::ingest(
                COMPANY_FILE,
                IngestErrorKind::MissingIdentifier { index },
            ));
        }

        let mut record = CompanyRecord::new(id);
        for (metric, lookup) in &lookups {
            if let Some(value) = lookup.get(key) {
                record.values.insert((*metric).to_string(), value.clone());
            }
        }
        records.push(record);
    }

    tracing::info!(
        "Joined {} companies from {} attribute files in {}",
        records.len(),
        lookups.len(),
        dir.display()
    );
    Ok(records)
}

/// `CompanyID` -> value for one attribute. The first row per ID wins.
fn attribute_lookup(table: &Table, attribute: &Attribute) -> Result<HashMap<String, RawValue>> {
    let key_col = require_column(table, JOIN_KEY, attribute.file)?;
    let Some(value_col) = table.any_column(attribute.columns) else {
        if attribute.file == COMPANY_FILE {
            return Ok(HashMap::new());
        }
        return Err(PartnerError::ingest(
            "split CSV",
            IngestErrorKind::MissingColumn {
                column: attribute.columns.join(" or "),
                file: attribute.file.to_string(),
            },
        ));
    };

    let mut lookup = HashMap::new();
    for row in &table.rows {
        let Some(key) = row.get(key_col).filter(|k| !k.is_empty()) else {
            continue;
        };
        if let Some(value) = row.get(value_col).and_then(RawValue::parse_cell) {
            lookup.entry(key.to_string()).or_insert(value);
        }
    }
    Ok(lookup)
}

fn require_column(table: &Table, column: &str, file: &str) -> Result<usize> {
    table.column(column).ok_or_else(|| {
        PartnerError::ingest(
            "split CSV",
            IngestErrorKind::MissingColumn {
                column: column.to_string(),
                file: file.to_string(),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_join_on_company_id() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "company.csv",
            "CompanyID,CompanyName,MarketCap,Revenue\n1,Acme,5000,10\n2,Globex,,20\n",
        );
        write(tmp.path(), "esg.csv", "ESGID,CompanyID,ESGScore\n10,1,80\n11,2,65\n");
        write(
            tmp.path(),
            "governance.csv",
            "GovernanceID,CompanyID,GovernanceScore\n7,2,B+\n",
        );
        write(tmp.path(), "stock.csv", "StockID,CompanyID,StockPrice\n3,1,150.5\n3,1,999\n");

        let records = load_split_csv(tmp.path()).unwrap();
        assert_eq!(records.len(), 2);

        let acme = &records[0];
        assert_eq!(acme.id, "Acme");
        assert_eq!(acme.get("MarketCap"), Some(&RawValue::Number(5000.0)));
        assert_eq!(acme.get("ESGScore"), Some(&RawValue::Number(80.0)));
        assert_eq!(acme.get("stockPrice"), Some(&RawValue::Number(150.5)));
        assert_eq!(acme.get("GovernanceRating"), None);
        assert_eq!(acme.get("RiskLevel"), None);

        let globex = &records[1];
        assert_eq!(globex.get("MarketCap"), None);
        assert_eq!(globex.get("GovernanceRating"), Some(&RawValue::from("B+")));
        assert_eq!(globex.get("stockPrice"), None);
    }

    #[test]
    fn test_missing_company_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_split_csv(tmp.path()).unwrap_err();
        assert!(matches!(err, PartnerError::Io { .. }));
    }

    #[test]
    fn test_missing_join_key() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "company.csv", "ID,CompanyName\n1,Acme\n");
        let err = load_split_csv(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            PartnerError::Ingest {
                source: IngestErrorKind::MissingColumn { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_attribute_file_without_value_column() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "company.csv", "CompanyID,CompanyName\n1,Acme\n");
        write(tmp.path(), "risk.csv", "CompanyID,Level\n1,Low\n");
        let err = load_split_csv(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("split CSV"));
    }

    #[test]
    fn test_name_falls_back_to_id() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "company.csv", "CompanyID,CompanyName\n42,\n");
        let records = load_split_csv(tmp.path()).unwrap();
        assert_eq!(records[0].id, "42");
    }
}
