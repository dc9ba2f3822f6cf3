use super::{CatalogFormat, CatalogParseError};
use log::debug;
use serde_json::{Map, Value};

/// One parsed catalog entry before field checks.
pub type CandidateRecord = Map<String, Value>;

/// Parses a catalog document into candidate records.
///
/// # Errors
/// - `Syntax` when the document cannot be decoded.
/// - `NotASequence` when the top-level value is not an array.
/// - `NotARecord` for the first element that is not a mapping.
pub fn parse_catalog(
    source: &str,
    format: CatalogFormat,
) -> Result<Vec<CandidateRecord>, CatalogParseError> {
    let document = decode_document(source, format)?;

    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            return Err(CatalogParseError::NotASequence {
                found: value_kind(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::Object(record) => records.push(record),
            other => {
                return Err(CatalogParseError::NotARecord {
                    index,
                    found: value_kind(&other),
                })
            }
        }
    }

    debug!(
        "event=catalog_parse module=catalog status=ok format={} records={}",
        format,
        records.len()
    );
    Ok(records)
}

/// YAML `.nan` and `.inf` have no JSON form and decode to `null`, so a
/// required field holding one is reported as missing.
fn decode_document(source: &str, format: CatalogFormat) -> Result<Value, CatalogParseError> {
    match format {
        CatalogFormat::Json => {
            serde_json::from_str::<Value>(source).map_err(|err| CatalogParseError::Syntax {
                format,
                message: err.to_string(),
                line: Some(err.line()),
                column: Some(err.column()),
            })
        }
        CatalogFormat::Yaml => {
            serde_yaml::from_str::<Value>(source).map_err(|err| {
                let location = err.location();
                CatalogParseError::Syntax {
                    format,
                    message: err.to_string(),
                    line: location.as_ref().map(|loc| loc.line()),
                    column: location.as_ref().map(|loc| loc.column()),
                }
            })
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}
