//! JSON datasets: an array of flat company objects.

use crate::error::{ErrorContext, IngestErrorKind, PartnerError, Result};
use crate::model::{CompanyRecord, RawValue};
use serde_json::Value;
use std::path::Path;

use super::csv::IDENTIFIER_COLUMN;

/// Parse `[{ "company": "...", "<metric>": value | null, ... }, ...]`.
///
/// `null` leaves a metric absent. Numbers and strings are kept as is;
/// booleans become text. Nested arrays or objects are rejected.
pub fn read_json(content: &str) -> Result<Vec<CompanyRecord>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(PartnerError::ingest(
            "JSON dataset",
            IngestErrorKind::InvalidJson("top level must be an array of objects".to_string()),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_object(index, item))
        .collect()
}

fn parse_object(index: usize, item: Value) -> Result<CompanyRecord> {
    let Value::Object(fields) = item else {
        return Err(PartnerError::ingest(
            "JSON dataset",
            IngestErrorKind::InvalidJson(format!("entry {index} is not an object")),
        ));
    };

    let id = match fields.get(IDENTIFIER_COLUMN) {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => {
            return Err(PartnerError::ingest(
                "JSON dataset",
                IngestErrorKind::MissingIdentifier { index },
            ))
        }
    };

    let mut record = CompanyRecord::new(id);
    for (key, value) in fields {
        if key == IDENTIFIER_COLUMN {
            continue;
        }
        let raw = match value {
            Value::Null => continue,
            Value::Number(n) => match n.as_f64() {
                Some(f) => RawValue::Number(f),
                None => RawValue::Text(n.to_string()),
            },
            Value::String(s) => RawValue::Text(s),
            Value::Bool(b) => RawValue::Text(b.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(PartnerError::ingest(
                    "JSON dataset",
                    IngestErrorKind::InvalidJson(format!(
                        "entry {index} field '{key}' must be a scalar"
                    )),
                ))
            }
        };
        record.values.insert(key, raw);
    }

    Ok(record)
}

/// Load a JSON dataset file.
pub fn load_json(path: &Path) -> Result<Vec<CompanyRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| PartnerError::io(path, e))?;
    read_json(&content).with_context(|| format!("reading {}", path.display()))
}
