//! Wide CSV datasets: one row per company, one column per metric.

use crate::error::{ErrorContext, IngestErrorKind, PartnerError, Result};
use crate::model::{CompanyRecord, RawValue};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Header recognized as the identifier column (case-insensitive).
pub const IDENTIFIER_COLUMN: &str = "company";

/// A CSV table held in memory.
#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Position of a header, exact match.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of the first header matching any of `names`.
    pub fn any_column(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column(name))
    }
}

/// Read a whole CSV source with headers, trimming surrounding whitespace.
pub(crate) fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Table { headers, rows })
}

/// Read a CSV file into a [`Table`].
pub(crate) fn read_table_file(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| PartnerError::io(path, e))?;
    read_table(file).with_context(|| format!("reading {}", path.display()))
}

/// Parse wide CSV records.
///
/// The identifier is the column named `company` if present, otherwise the
/// first column. Every other header is a metric name. Empty cells are left
/// absent; numeric-looking cells become numbers.
pub fn read_wide_csv<R: Read>(reader: R) -> Result<Vec<CompanyRecord>> {
    let table = read_table(reader)?;
    if table.headers.is_empty() {
        return Err(PartnerError::ingest(
            "wide CSV",
            IngestErrorKind::MissingColumn {
                column: IDENTIFIER_COLUMN.to_string(),
                file: "<header row>".to_string(),
            },
        ));
    }

    let id_column = table
        .headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(IDENTIFIER_COLUMN))
        .unwrap_or(0);

    let mut records = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let id = row.get(id_column).unwrap_or_default();
        if id.is_empty() {
            return Err(PartnerError::ingest(
                "wide CSV",
                IngestErrorKind::MissingIdentifier { index },
            ));
        }

        let mut record = CompanyRecord::new(id);
        for (column, header) in table.headers.iter().enumerate() {
            if column == id_column {
                continue;
            }
            if let Some(value) = row.get(column).and_then(RawValue::parse_cell) {
                record.values.insert(header.to_string(), value);
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// Load a wide CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<CompanyRecord>> {
    let file = std::fs::File::open(path).map_err(|e| PartnerError::io(path, e))?;
    read_wide_csv(file).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_column_is_identifier() {
        let csv = "name,stockPrice,GovernanceRating\nAcme,120.5,A+\nGlobex,,B\n";
        let records = read_wide_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "Acme");
        assert_eq!(records[0].get("stockPrice"), Some(&RawValue::Number(120.5)));
        assert_eq!(records[0].get("GovernanceRating"), Some(&RawValue::from("A+")));
        // Empty cells stay absent
        assert_eq!(records[1].get("stockPrice"), None);
        assert!(records[0].get("name").is_none());
    }

    #[test]
    fn test_company_column_wins() {
        let csv = "ESGScore,Company\n80,Initech\n";
        let records = read_wide_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].id, "Initech");
        assert_eq!(records[0].get("ESGScore"), Some(&RawValue::Number(80.0)));
    }

    #[test]
    fn test_missing_identifier_fails() {
        let csv = "company,ESGScore\n,80\n";
        let err = read_wide_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PartnerError::Ingest {
                source: IngestErrorKind::MissingIdentifier { index: 0 },
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_cells_kept_as_text() {
        let csv = "company,stockPrice\nHooli,n/a\n";
        let records = read_wide_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].get("stockPrice"), Some(&RawValue::from("n/a")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_csv(Path::new("/nonexistent/companies.csv")).unwrap_err();
        assert!(matches!(err, PartnerError::Io { .. }));
    }
}
