//! Turtle serialization of company -> metric assertions.
//!
//! Output shape:
//!
//! ```text
//! @prefix ex: <http://example.org/ns#> .
//! @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
//!
//! <http://example.org/company/Samsung> a ex:Company ;
//!     ex:hasCompanyName "Samsung"^^xsd:string ;
//!     ex:hasStockPrice "800"^^xsd:float .
//! ```

use crate::error::{ExportErrorKind, PartnerError, Result};
use crate::model::{CompanyRecord, Dataset, MetricCatalog, MetricSpec, RawValue};
use std::fmt::Write as _;
use std::io::Write;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Render the dataset as Turtle.
pub fn export_turtle(dataset: &Dataset, catalog: &MetricCatalog, base_uri: &str) -> Result<String> {
    validate_base_uri(base_uri)?;

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "@prefix ex: <{base_uri}ns#> .");
    let _ = writeln!(out, "@prefix xsd: <{XSD}> .");

    for record in dataset.records() {
        out.push('\n');
        write_company(&mut out, record, catalog, base_uri);
    }

    tracing::info!("Exported {} companies as Turtle", dataset.len());
    Ok(out)
}

/// Render the dataset as Turtle into a writer.
pub fn write_turtle<W: Write>(
    writer: &mut W,
    dataset: &Dataset,
    catalog: &MetricCatalog,
    base_uri: &str,
) -> Result<()> {
    let turtle = export_turtle(dataset, catalog, base_uri)?;
    writer
        .write_all(turtle.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| PartnerError::export("writing Turtle", ExportErrorKind::Write(e.to_string())))
}

fn write_company(out: &mut String, record: &CompanyRecord, catalog: &MetricCatalog, base: &str) {
    let _ = write!(
        out,
        "<{base}company/{}> a ex:Company ;\n    ex:hasCompanyName \"{}\"^^xsd:string",
        escape_iri_segment(&record.id),
        escape_literal(&record.id)
    );

    for (metric, value) in &record.values {
        let numeric = match catalog.get(metric).map(|d| &d.spec) {
            Some(MetricSpec::Range { .. }) => value.as_number(),
            Some(MetricSpec::Categorical { .. }) => None,
            None => match value {
                RawValue::Number(n) => Some(*n),
                RawValue::Text(_) => None,
            },
        };
        let literal = match numeric {
            Some(n) => format!("\"{}\"^^xsd:float", RawValue::Number(n)),
            None => format!("\"{}\"^^xsd:string", escape_literal(&value.as_label())),
        };
        let _ = write!(out, " ;\n    ex:{} {literal}", predicate(metric));
    }
    out.push_str(" .\n");
}

/// `stockPrice` -> `hasStockPrice`. Characters outside `[A-Za-z0-9_]` become `_`.
fn predicate(metric: &str) -> String {
    let mut name = String::with_capacity(metric.len() + 3);
    name.push_str("has");
    let mut chars = metric.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
    }
    name.extend(chars);
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Percent-encode everything except RFC 3986 unreserved characters.
fn escape_iri_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            escaped.push(char::from(byte));
        } else {
            let _ = write!(escaped, "%{byte:02X}");
        }
    }
    escaped
}

fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn validate_base_uri(base: &str) -> Result<()> {
    let has_scheme = base.starts_with("http://") || base.starts_with("https://");
    let terminated = base.ends_with('/') || base.ends_with('#');
    let clean = !base
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`'));

    if has_scheme && terminated && clean {
        Ok(())
    } else {
        Err(PartnerError::export(
            "Turtle export",
            ExportErrorKind::InvalidBaseUri(format!(
                "'{base}' must be an http(s) URI ending in '/' or '#'"
            )),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_export() {
        let turtle =
            export_turtle(&Dataset::demo(), &MetricCatalog::builtin(), "http://example.org/")
                .unwrap();

        assert!(turtle.starts_with("@prefix ex: <http://example.org/ns#> ."));
        assert!(turtle.contains("<http://example.org/company/Samsung> a ex:Company ;"));
        assert!(turtle.contains("ex:hasStockPrice \"800\"^^xsd:float"));
        assert!(turtle.contains("ex:hasESGScore \"75\"^^xsd:float"));
        assert!(turtle.contains("ex:hasGovernanceRating \"A+\"^^xsd:string"));
        assert!(turtle.contains("ex:hasRiskLevel \"Medium\"^^xsd:string"));
        assert_eq!(turtle.matches("a ex:Company").count(), 3);
        // Two prefix lines plus one statement per company
        assert_eq!(turtle.matches(" .\n").count(), 5);
    }

    #[test]
    fn test_identifiers_escaped() {
        let dataset = Dataset::from_records([CompanyRecord::new("Procter & \"Gamble\"")
            .with_value("ESGScore", 70)]);
        let turtle = export_turtle(&dataset, &MetricCatalog::builtin(), "https://ex.test/").unwrap();
        assert!(turtle.contains("<https://ex.test/company/Procter%20%26%20%22Gamble%22>"));
        assert!(turtle.contains(r#"ex:hasCompanyName "Procter & \"Gamble\""^^xsd:string"#));
    }

    #[test]
    fn test_unknown_metric_typed_by_value() {
        let dataset = Dataset::from_records([CompanyRecord::new("Acme")
            .with_value("Revenue", 12.5)
            .with_value("sector name", "Tech")]);
        let turtle = export_turtle(&dataset, &MetricCatalog::builtin(), "http://example.org/").unwrap();
        assert!(turtle.contains("ex:hasRevenue \"12.5\"^^xsd:float"));
        assert!(turtle.contains("ex:hasSector_name \"Tech\"^^xsd:string"));
    }

    #[test]
    fn test_invalid_base_uri() {
        for base in ["example.org/", "http://example.org", "http://exa mple.org/"] {
            let err = export_turtle(&Dataset::demo(), &MetricCatalog::builtin(), base).unwrap_err();
            assert!(matches!(
                err,
                PartnerError::Export {
                    source: ExportErrorKind::InvalidBaseUri(_),
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_write_turtle() {
        let mut buf = Vec::new();
        write_turtle(
            &mut buf,
            &Dataset::demo(),
            &MetricCatalog::builtin(),
            "http://example.org/",
        )
        .unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("ex:Company"));
    }
}
