//! Catalog source parsing and typed loading.
//!
//! # Responsibility
//! - Turn a catalog document (JSON or YAML) into candidate records.
//! - Convert a catalog that validated into typed `InitiativeRecord`s.
//!
//! # Invariants
//! - Parsing is all-or-nothing: a malformed document yields no records.
//! - Candidate order always matches document order.

use crate::model::initiative::InitiativeRecord;
use crate::validate::{validate_records, ValidationReport};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod source;

pub use source::{parse_catalog, CandidateRecord};

/// Serialization format of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFormat {
    #[default]
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Infers the format from a file extension.
    ///
    /// `.yaml`/`.yml` map to YAML; everything else (including no extension)
    /// is treated as JSON.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl Display for CatalogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal catalog parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogParseError {
    /// Document is not syntactically valid in its declared format.
    Syntax {
        format: CatalogFormat,
        message: String,
        /// 1-based position when the decoder reports one.
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Top-level value is not a sequence.
    NotASequence { found: &'static str },
    /// A sequence element is not a key-value mapping.
    NotARecord { index: usize, found: &'static str },
}

impl Display for CatalogParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax {
                format,
                message,
                line: Some(line),
                column: Some(column),
            } => write!(
                f,
                "malformed {format} catalog at line {line}, column {column}: {message}"
            ),
            Self::Syntax {
                format, message, ..
            } => write!(f, "malformed {format} catalog: {message}"),
            Self::NotASequence { found } => {
                write!(f, "catalog must be a sequence of records, found {found}")
            }
            Self::NotARecord { index, found } => {
                write!(f, "catalog entry {index} must be a record, found {found}")
            }
        }
    }
}

impl Error for CatalogParseError {}

/// Failure to produce typed records from a catalog document.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLoadError {
    Parse(CatalogParseError),
    /// The catalog parsed but has field-completeness diagnostics.
    Incomplete(ValidationReport),
    /// A validated candidate still failed typed decoding.
    Decode { index: usize, message: String },
}

impl Display for CatalogLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Incomplete(report) => write!(
                f,
                "catalog has {} field issue(s) across {} record(s)",
                report.diagnostics.len(),
                report.record_count
            ),
            Self::Decode { index, message } => {
                write!(f, "catalog entry {index} could not be decoded: {message}")
            }
        }
    }
}

impl Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Incomplete(_) | Self::Decode { .. } => None,
        }
    }
}

impl From<CatalogParseError> for CatalogLoadError {
    fn from(value: CatalogParseError) -> Self {
        Self::Parse(value)
    }
}

/// Parses, validates and decodes a catalog into typed records.
///
/// # Errors
/// - `Parse` when the document is malformed.
/// - `Incomplete` with the full report when any field diagnostic exists.
pub fn load_catalog(
    source: &str,
    format: CatalogFormat,
) -> Result<Vec<InitiativeRecord>, CatalogLoadError> {
    let candidates = parse_catalog(source, format)?;
    load_records(&candidates)
}

/// Decodes already-parsed candidates after checking field completeness.
pub fn load_records(
    candidates: &[CandidateRecord],
) -> Result<Vec<InitiativeRecord>, CatalogLoadError> {
    let report = validate_records(candidates);
    if !report.is_valid() {
        return Err(CatalogLoadError::Incomplete(report));
    }

    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            serde_json::from_value::<InitiativeRecord>(serde_json::Value::Object(
                candidate.clone(),
            ))
            .map_err(|err| CatalogLoadError::Decode {
                index,
                message: err.to_string(),
            })
        })
        .collect()
}
